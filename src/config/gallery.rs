//! The curated rings shipped with the default configuration.

use crate::models::GalleryRing;

const UNSPLASH: &str = "https://images.unsplash.com";

/// `(id, title, description, unsplash photo)`.
const CURATED: [(u32, &str, &str, &str); 10] = [
    (
        1,
        "Round Brilliant Solitaire",
        "The timeless classic - a stunning round brilliant diamond on a sleek platinum band. \
         Maximum sparkle, eternal elegance.",
        "photo-1586104237516-5765e76a6fc0",
    ),
    (
        2,
        "Oval Halo",
        "An elegant oval center diamond embraced by a dazzling halo of micro-pavé diamonds. \
         Elongates the finger beautifully.",
        "photo-1589674781759-c21c37956a44",
    ),
    (
        3,
        "Cushion Cut Romance",
        "Soft, romantic cushion cut diamond in a cathedral setting with delicate pavé band. \
         Vintage charm meets modern brilliance.",
        "photo-1599643477877-530eb83abc8e",
    ),
    (
        4,
        "Three-Stone Legacy",
        "Past, present, and future symbolized by three brilliant diamonds. \
         A meaningful choice with spectacular presence.",
        "photo-1598560917505-59a3ad559071",
    ),
    (
        5,
        "Princess Cut Modern",
        "Bold princess cut diamond in a sleek channel-set band. \
         Contemporary geometry with dazzling fire.",
        "photo-1600721391776-b5cd0e0048f9",
    ),
    (
        6,
        "Pear Drop Elegance",
        "Unique pear-shaped diamond with hidden halo and split shank. \
         Feminine, distinctive, unforgettable.",
        "photo-1602751584552-8ba73aad10e1",
    ),
    (
        7,
        "Emerald Art Deco",
        "Sophisticated emerald cut with step-cut facets in a geometric Art Deco setting \
         with baguette side stones.",
        "photo-1591209627710-d2427a94c82e",
    ),
    (
        8,
        "Marquise Vintage",
        "Dramatic marquise diamond with ornate milgrain details and filigree. \
         Old-world glamour for the romantic soul.",
        "photo-1605100804763-247f67b3557e",
    ),
    (
        9,
        "Radiant Sparkle",
        "Show-stopping radiant cut combines the elegance of emerald with the fire of brilliant. \
         Double halo for maximum impact.",
        "photo-1543294001-f7cd5d7fb516",
    ),
    (
        10,
        "Asscher Gatsby",
        "The Art Deco icon - distinctive Asscher cut with mesmerizing step facets. \
         Bezel-set for a clean, modern look.",
        "photo-1515562141207-7a88fb7ce338",
    ),
];

/// The default gallery. Entries carry only a fallback image.
#[must_use]
pub fn curated_gallery() -> Vec<GalleryRing> {
    CURATED
        .iter()
        .map(|&(id, title, description, photo)| GalleryRing {
            id,
            title: title.to_string(),
            description: description.to_string(),
            image_url: String::new(),
            fallback_url: Some(format!("{UNSPLASH}/{photo}?w=500&q=80")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_gallery_is_complete() {
        let gallery = curated_gallery();
        assert_eq!(gallery.len(), 10);

        let ids: Vec<u32> = gallery.iter().map(|ring| ring.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert!(gallery.iter().all(|ring| ring.display_url().starts_with(UNSPLASH)));
    }
}
