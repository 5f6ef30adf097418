//! Expense-category classification.
//!
//! Keyword voting over the folded text: each category keyword found counts
//! one vote, the category with the most votes wins, and on a tie the earlier
//! category in the table wins. No votes means no category.

use tracing::debug;

use crate::models::receipt::Category;
use crate::normalize::NormalizedText;

/// Category keyword table (ASCII-folded, uppercase).
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "MARKET", "BAKKAL", "MANAV", "KASAP", "FIRIN", "PASTANE", "RESTORAN", "RESTAURANT",
            "LOKANTA", "KAFE", "CAFE", "BUFE", "GIDA", "EKMEK", "YEMEK", "KAHVE", "BURGER",
            "PIZZA", "GROCERY", "SUPERMARKET", "DELI", "FOOD",
        ],
    ),
    (
        Category::Transportation,
        &[
            "BENZIN", "PETROL", "AKARYAKIT", "OTOPARK", "PARKING", "TAKSI", "TAXI", "OTOBUS",
            "METRO", "BILET", "FUEL", "SHELL", "OPET", "TRANSIT",
        ],
    ),
    (
        Category::Office,
        &[
            "KIRTASIYE", "OFIS", "OFFICE", "KAGIT", "KALEM", "TONER", "KARTUS", "STATIONERY",
            "PAPER", "PENS",
        ],
    ),
    (
        Category::Healthcare,
        &[
            "ECZANE", "PHARMACY", "HASTANE", "HOSPITAL", "KLINIK", "CLINIC", "ILAC", "MEDIKAL",
            "SAGLIK", "MEDICAL",
        ],
    ),
    (
        Category::Utilities,
        &[
            "ELEKTRIK", "DOGALGAZ", "INTERNET", "TELEFON", "FATURA", "TELEKOM", "TURKCELL",
            "VODAFONE", "UTILITY", "ELECTRIC",
        ],
    ),
    (
        Category::Maintenance,
        &[
            "TAMIR", "BAKIM", "ONARIM", "SERVIS", "YEDEK PARCA", "REPAIR", "MAINTENANCE",
            "SERVICE",
        ],
    ),
];

/// Classify the receipt into an expense category, if any keyword votes for
/// one.
pub fn classify_category(text: &NormalizedText) -> Option<Category> {
    let mut best: Option<(Category, usize)> = None;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let votes = keywords.iter().filter(|k| text.folded.contains(**k)).count();
        if votes == 0 {
            continue;
        }
        // Strict comparison keeps the earlier category on ties.
        match best {
            Some((_, top)) if votes <= top => {}
            _ => best = Some((*category, votes)),
        }
    }

    if let Some((category, votes)) = best {
        debug!(?category, votes, "category classified");
        return Some(category);
    }
    None
}
