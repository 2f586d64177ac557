use catalog::{PillColors, PointOfInterest, category_colors, category_label, title_case};
use foundation::ids::PoiId;
use serde::Serialize;

/// Category pills shown on a detail card.
pub const MAX_PILLS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPill {
    pub tag: String,
    pub label: String,
    pub colors: PillColors,
}

/// Content of the shared detail surface for one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailCard {
    pub id: PoiId,
    pub title: String,
    /// Human-readable administrative area, e.g. `San Andres`.
    pub location: Option<String>,
    pub pills: Vec<CategoryPill>,
    pub media: Vec<String>,
    pub description: String,
    /// Drives the add-to-plan button: `true` shows the "done" state.
    pub in_plan: bool,
}

impl DetailCard {
    pub fn for_point(poi: &PointOfInterest, in_plan: bool) -> Self {
        let pills = poi
            .categories
            .iter()
            .take(MAX_PILLS)
            .map(|tag| CategoryPill {
                tag: tag.clone(),
                label: category_label(tag),
                colors: category_colors(tag),
            })
            .collect();
        Self {
            id: poi.id.clone(),
            title: poi.id.to_string(),
            location: poi.location.as_deref().map(title_case),
            pills,
            media: poi.media.clone(),
            description: poi.description.clone(),
            in_plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DetailCard;
    use catalog::PointOfInterest;
    use foundation::math::LonLat;
    use pretty_assertions::assert_eq;

    #[test]
    fn card_keeps_two_pills_and_formats_location() {
        let poi = PointOfInterest::new("Mamangal Beach", LonLat::new(124.2, 13.6))
            .with_categories(["BEACH", "RELIGIOUS_SITE", "CAFE"])
            .with_location("SAN_ANDRES")
            .with_description("White sand cove.");
        let card = DetailCard::for_point(&poi, true);

        let labels: Vec<_> = card.pills.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["beach", "religious site"]);
        assert_eq!(card.location.as_deref(), Some("San Andres"));
        assert!(card.media.is_empty());
        assert!(card.in_plan);
    }
}
