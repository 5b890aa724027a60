use crate::domain::MembershipSeed;
use std::fs;

const SEED_JSON: &str = include_str!("../../assets/seed.json");

pub struct SeedRepository;

impl SeedRepository {
    pub fn load_embedded() -> Result<MembershipSeed, String> {
        match serde_json::from_str::<MembershipSeed>(SEED_JSON) {
            Ok(seed) => Ok(seed),
            Err(e) => Err(format!("Invalid seed data - {}", e)),
        }
    }

    pub fn load_from_file(filename: &str) -> Result<(MembershipSeed, String), String> {
        match fs::read_to_string(filename) {
            Ok(content) => match serde_json::from_str::<MembershipSeed>(&content) {
                Ok(seed) => Ok((seed, filename.to_string())),
                Err(e) => Err(format!("Invalid file format - {}", e)),
            },
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_seed_parses() {
        let seed = SeedRepository::load_embedded().unwrap();

        assert_eq!(seed.user.name, "Made Daryl");
        assert_eq!(seed.user.balance, 125_000);
        assert_eq!(seed.user.stars, 287);

        assert_eq!(seed.products.len(), 5);
        assert_eq!(seed.stores.len(), 3);
        assert_eq!(seed.offers.len(), 3);
        assert_eq!(seed.recent_orders.len(), 3);
        assert_eq!(seed.payment_methods.len(), 4);
        assert_eq!(seed.notifications.len(), 5);
        assert_eq!(seed.rewards.len(), 5);
    }

    #[test]
    fn test_embedded_seed_specials_and_options() {
        let seed = SeedRepository::load_embedded().unwrap();

        for store in &seed.stores {
            assert_eq!(store.special_menu.category, "Store Special");
            assert!(!store.special_menu.sizes.is_empty());
        }

        // Food items carry no size or milk options
        let croissant = seed
            .products
            .iter()
            .find(|p| p.name == "Croissant")
            .unwrap();
        assert!(croissant.sizes.is_empty());
        assert!(croissant.milks.is_empty());

        // Exactly two rewards start out redeemable
        let available = seed.rewards.iter().filter(|r| r.available).count();
        assert_eq!(available, 2);
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let seed = SeedRepository::load_embedded().unwrap();
        let json = serde_json::to_string_pretty(&seed).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(&path, json).unwrap();

        let (loaded, filename) = SeedRepository::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, seed);
        assert_eq!(filename, path.to_str().unwrap());
    }

    #[test]
    fn test_load_from_file_missing_file() {
        let result = SeedRepository::load_from_file("no-such-seed.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result = SeedRepository::load_from_file(path.to_str().unwrap());
        assert!(result.unwrap_err().contains("Invalid file format"));
    }
}
