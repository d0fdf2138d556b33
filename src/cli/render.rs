//! Plain-text rendering of models for terminal output.

use crate::models::{BatchOutcome, DesignRecord, Ring, SavedDesign, TermPreview, TrashedRing};
use chrono::{DateTime, Utc};
use std::fmt::Write;

fn date(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d %H:%M").to_string())
}

fn or_untitled(title: &str) -> &str {
    if title.is_empty() { "(untitled)" } else { title }
}

/// One line per ring: id, flag, title, type, designer and creation date.
#[must_use]
pub fn render_ring(ring: &Ring) -> String {
    format!(
        "{} {} {} [{}] by {} on {}",
        if ring.is_the_one { "*" } else { " " },
        ring.id,
        or_untitled(&ring.title),
        ring.kind,
        ring.designer_name,
        date(ring.created_at),
    )
}

/// One line per trashed ring, with its deletion date.
#[must_use]
pub fn render_trashed(trashed: &TrashedRing) -> String {
    format!(
        "  {} {} [{}] deleted {}",
        trashed.id(),
        or_untitled(&trashed.ring.title),
        trashed.ring.kind,
        date(trashed.deleted_at),
    )
}

/// Multi-line view of the locally saved design.
#[must_use]
pub fn render_design(design: &SavedDesign) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Type: {}", design.kind);
    if let Some(title) = &design.title {
        let _ = writeln!(out, "Title: {title}");
    }
    let _ = writeln!(out, "Description: {}", design.description);
    let _ = writeln!(out, "Image: {}", design.image_url);
    if let Some(prompt) = &design.prompt {
        let _ = writeln!(out, "Prompt: {prompt}");
    }
    let _ = write!(out, "Confirmed: {}", crate::format_timestamp(&design.timestamp));
    out
}

/// One line per archived design.
#[must_use]
pub fn render_design_record(record: &DesignRecord) -> String {
    format!(
        "{} [{}] {} on {}",
        record.id,
        record.design_type,
        or_untitled(&record.title),
        date(record.created_at),
    )
}

/// One line per term preview.
#[must_use]
pub fn render_preview(preview: &TermPreview) -> String {
    format!("{}: {} ({})", preview.term, preview.caption, preview.image_url)
}

/// Summary of a trash batch, followed by one line per failure.
#[must_use]
pub fn render_outcome(outcome: &BatchOutcome) -> String {
    if outcome.total == 0 {
        return "Trash is empty".to_string();
    }

    let verb = outcome.kind.past_tense();
    let mut out = format!("{verb} {}/{} rings", outcome.processed, outcome.total);
    for error in &outcome.errors {
        let _ = write!(out, "\n  {error}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchKind, DesignKind, RingKind};
    use chrono::TimeZone;

    fn ring() -> Ring {
        Ring {
            id: "ring_1".to_string(),
            image_url: "https://img/1.png".to_string(),
            prompt: String::new(),
            title: String::new(),
            kind: RingKind::Gallery,
            designer_name: "Ada".to_string(),
            is_the_one: true,
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_render_ring() {
        assert_eq!(
            render_ring(&ring()),
            "* ring_1 (untitled) [gallery] by Ada on 2024-05-01 09:30"
        );

        let mut plain = ring();
        plain.is_the_one = false;
        plain.created_at = None;
        plain.title = "Halo".to_string();
        assert_eq!(render_ring(&plain), "  ring_1 Halo [gallery] by Ada on -");
    }

    #[test]
    fn test_render_trashed() {
        let deleted = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let trashed = TrashedRing::from_ring(ring(), deleted);
        assert_eq!(
            render_trashed(&trashed),
            "  ring_1 (untitled) [gallery] deleted 2024-06-02 00:00"
        );
    }

    #[test]
    fn test_render_design_skips_absent_fields() {
        let design = SavedDesign {
            kind: DesignKind::Gallery,
            image_url: "https://img/1.png".to_string(),
            description: "Classic solitaire".to_string(),
            prompt: None,
            title: None,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        };
        let text = render_design(&design);
        assert!(text.starts_with("Type: gallery\nDescription: Classic solitaire"));
        assert!(!text.contains("Prompt"));
        assert!(text.ends_with("Confirmed: 2024-05-01T00:00:00Z"));
    }

    #[test]
    fn test_render_outcome() {
        assert_eq!(
            render_outcome(&BatchOutcome::empty(BatchKind::Delete)),
            "Trash is empty"
        );

        let outcome = BatchOutcome::from_counts(
            BatchKind::Restore,
            1,
            2,
            vec!["Failed to restore ring_2: boom".to_string()],
        );
        assert_eq!(
            render_outcome(&outcome),
            "Restored 1/2 rings\n  Failed to restore ring_2: boom"
        );
    }
}
