//! Static manufacturer -> model catalog

use crate::constants::MANUFACTURERS;

#[derive(Debug, Clone)]
pub struct ManufacturerCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl ManufacturerCatalog {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self::new(
            MANUFACTURERS
                .iter()
                .map(|(name, models)| {
                    (
                        name.to_string(),
                        models.iter().map(|m| m.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn manufacturers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn models(&self, manufacturer: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == manufacturer)
            .map(|(_, models)| models.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keeps_declared_order() {
        let catalog = ManufacturerCatalog::builtin();
        let names: Vec<&str> = catalog.manufacturers().collect();
        assert_eq!(names, ["Apple", "Samsung", "Google"]);
        let google = catalog.models("Google").unwrap();
        assert_eq!(google.first().map(String::as_str), Some("Pixel 4"));
        assert_eq!(google.last().map(String::as_str), Some("Pixel 6"));
    }

    #[test]
    fn unknown_manufacturer_has_no_models() {
        assert!(ManufacturerCatalog::builtin().models("Nokia").is_none());
    }
}
