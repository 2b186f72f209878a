//! Sample listings for demos and tests.

use tracing::info;

use crate::error::Result;
use crate::models::{NewProperty, Price};
use crate::services::PropertyService;

/// The five demo listings.
pub fn sample_properties() -> Vec<NewProperty> {
    vec![
        NewProperty::new(
            "Modern Downtown Apartment",
            "Beautiful 2-bedroom apartment in the heart of downtown with city views.",
            Price::from_cents(250_000),
            "Downtown",
        ),
        NewProperty::new(
            "Suburban Family Home",
            "Spacious 4-bedroom family home with large backyard and garage.",
            Price::from_cents(45_000_000),
            "Suburbs",
        ),
        NewProperty::new(
            "Luxury Penthouse",
            "Exclusive penthouse with panoramic views and premium amenities.",
            Price::from_cents(120_000_000),
            "Uptown",
        ),
        NewProperty::new(
            "Cozy Studio",
            "Affordable studio apartment perfect for students or young professionals.",
            Price::from_cents(120_000),
            "University District",
        ),
        NewProperty::new(
            "Waterfront Condo",
            "Stunning waterfront condo with private balcony and marina access.",
            Price::from_cents(75_000_000),
            "Harbor",
        ),
    ]
}

/// Inserts any sample listing not already present (matched by title).
///
/// Returns how many were created.
pub async fn seed_sample_properties(service: &PropertyService) -> Result<usize> {
    let mut created_count = 0;
    for new in sample_properties() {
        let (property, created) = service.get_or_create_by_title(new).await?;
        if created {
            created_count += 1;
            info!(title = %property.title, price = %property.price, "Created sample property");
        } else {
            info!(title = %property.title, "Sample property already exists");
        }
    }

    info!(
        created = created_count,
        total = service.count().await?,
        "Sample data seeded"
    );
    Ok(created_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, MemoryBackend};
    use crate::store::MemoryRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let service = PropertyService::new(
            Arc::new(MemoryRepository::new()),
            Arc::new(MemoryBackend::new(10)),
            CacheKey::all_properties(None),
            3600,
        );

        assert_eq!(seed_sample_properties(&service).await.unwrap(), 5);
        assert_eq!(seed_sample_properties(&service).await.unwrap(), 0);
        assert_eq!(service.count().await.unwrap(), 5);
    }

    #[test]
    fn test_sample_prices() {
        let prices: Vec<String> = sample_properties()
            .iter()
            .map(|p| p.price.to_string())
            .collect();
        assert_eq!(
            prices,
            vec!["2500.00", "450000.00", "1200000.00", "1200.00", "750000.00"]
        );
    }
}
