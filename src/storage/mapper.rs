//! Record Mapper: domain values to and from typed document fields.
//!
//! Encoding wraps every attribute in its typed envelope. Decoding is total:
//! a missing or mistyped field falls back to its default and never fails,
//! so partial documents written by older clients still load.

use super::document::{Document, Fields, Value};
use crate::models::{
    DEFAULT_DESIGNER_NAME, DesignRecord, Ring, RingKind, TermPreview, TrashedRing,
};
use chrono::{DateTime, Utc};

const ID: &str = "id";
const IMAGE_URL: &str = "image_url";
const PROMPT: &str = "prompt";
const TITLE: &str = "title";
const TYPE: &str = "type";
const DESIGNER_NAME: &str = "designer_name";
const IS_THE_ONE: &str = "is_the_one";
const CREATED_AT: &str = "created_at";
const ORIGINAL_CREATED_AT: &str = "original_created_at";
const DELETED_AT: &str = "deleted_at";

/// A value that can be stored as a single document.
pub trait DocumentRecord: Sized {
    /// Encodes the value into typed fields.
    fn encode(&self) -> Fields;

    /// Decodes a document. Never fails; absent fields take defaults.
    fn decode(doc: &Document) -> Self;

    /// Timestamp used to order listings, most recent first.
    fn recency(&self) -> Option<DateTime<Utc>>;
}

/// Encodes any record.
#[must_use]
pub fn encode<R: DocumentRecord>(record: &R) -> Fields {
    record.encode()
}

/// Decodes any record.
#[must_use]
pub fn decode<R: DocumentRecord>(doc: &Document) -> R {
    R::decode(doc)
}

/// Sorts records most recent first. Records without a timestamp go last,
/// keeping their relative order.
pub fn sort_most_recent_first<R: DocumentRecord>(records: &mut [R]) {
    records.sort_by(|a, b| b.recency().cmp(&a.recency()));
}

fn put_string(fields: &mut Fields, key: &str, value: &str) {
    fields.insert(key.to_string(), Value::string(value));
}

fn put_timestamp(fields: &mut Fields, key: &str, value: Option<&DateTime<Utc>>) {
    if let Some(ts) = value {
        fields.insert(key.to_string(), Value::timestamp(ts));
    }
}

fn encode_ring_fields(ring: &Ring, created_key: &str) -> Fields {
    let mut fields = Fields::new();
    put_string(&mut fields, ID, &ring.id);
    put_string(&mut fields, IMAGE_URL, &ring.image_url);
    put_string(&mut fields, PROMPT, &ring.prompt);
    put_string(&mut fields, TITLE, &ring.title);
    put_string(&mut fields, TYPE, ring.kind.as_str());
    put_string(&mut fields, DESIGNER_NAME, &ring.designer_name);
    fields.insert(IS_THE_ONE.to_string(), Value::boolean(ring.is_the_one));
    put_timestamp(&mut fields, created_key, ring.created_at.as_ref());
    fields
}

fn decode_ring_fields(doc: &Document, created_key: &str) -> Ring {
    let text = |key: &str| doc.string(key).unwrap_or_default().to_string();

    let id = doc
        .string(ID)
        .filter(|id| !id.is_empty())
        .or_else(|| doc.document_id())
        .unwrap_or_default()
        .to_string();

    Ring {
        id,
        image_url: text(IMAGE_URL),
        prompt: text(PROMPT),
        title: text(TITLE),
        kind: doc.string(TYPE).and_then(RingKind::parse).unwrap_or_default(),
        designer_name: doc
            .string(DESIGNER_NAME)
            .unwrap_or(DEFAULT_DESIGNER_NAME)
            .to_string(),
        is_the_one: doc.boolean(IS_THE_ONE).unwrap_or(false),
        created_at: doc.timestamp(created_key),
    }
}

impl DocumentRecord for Ring {
    fn encode(&self) -> Fields {
        encode_ring_fields(self, CREATED_AT)
    }

    fn decode(doc: &Document) -> Self {
        decode_ring_fields(doc, CREATED_AT)
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl DocumentRecord for TrashedRing {
    fn encode(&self) -> Fields {
        let mut fields = encode_ring_fields(&self.ring, ORIGINAL_CREATED_AT);
        put_timestamp(&mut fields, DELETED_AT, self.deleted_at.as_ref());
        fields
    }

    fn decode(doc: &Document) -> Self {
        Self {
            ring: decode_ring_fields(doc, ORIGINAL_CREATED_AT),
            deleted_at: doc.timestamp(DELETED_AT),
        }
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl DocumentRecord for DesignRecord {
    fn encode(&self) -> Fields {
        let mut fields = Fields::new();
        put_string(&mut fields, "design_type", &self.design_type);
        put_string(&mut fields, TITLE, &self.title);
        put_string(&mut fields, "description", &self.description);
        put_string(&mut fields, IMAGE_URL, &self.image_url);
        put_string(&mut fields, "ai_prompt", &self.ai_prompt);
        put_timestamp(&mut fields, CREATED_AT, self.created_at.as_ref());
        fields
    }

    fn decode(doc: &Document) -> Self {
        let text = |key: &str| doc.string(key).unwrap_or_default().to_string();
        Self {
            id: doc.name.clone().unwrap_or_default(),
            design_type: text("design_type"),
            title: text(TITLE),
            description: text("description"),
            image_url: text(IMAGE_URL),
            ai_prompt: text("ai_prompt"),
            created_at: doc.timestamp(CREATED_AT),
        }
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl DocumentRecord for TermPreview {
    fn encode(&self) -> Fields {
        let mut fields = Fields::new();
        put_string(&mut fields, "term", &self.term);
        put_string(&mut fields, IMAGE_URL, &self.image_url);
        put_string(&mut fields, "caption", &self.caption);
        put_timestamp(&mut fields, "generated_at", self.generated_at.as_ref());
        fields
    }

    fn decode(doc: &Document) -> Self {
        let text = |key: &str| doc.string(key).unwrap_or_default().to_string();
        Self {
            term: text("term"),
            image_url: text(IMAGE_URL),
            caption: text("caption"),
            generated_at: doc.timestamp("generated_at"),
        }
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }
}
