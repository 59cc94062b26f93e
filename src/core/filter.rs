use crate::domain::model::{FilterCriteria, Part};

impl FilterCriteria {
    /// Parses a user-supplied price bound. Non-numeric input degrades to
    /// "no bound" rather than an error; the permissiveness is intentional
    /// and mirrors how the feeds' consumers already behave.
    pub fn price_bound(input: Option<&str>) -> Option<f64> {
        let text = input?.trim();
        if text.is_empty() {
            return None;
        }
        match text.parse::<f64>() {
            Ok(bound) => Some(bound),
            Err(_) => {
                tracing::warn!("Ignoring non-numeric price bound: '{}'", text);
                None
            }
        }
    }

    pub fn matches(&self, part: &Part) -> bool {
        if let Some(needle) = &self.type_contains {
            if !contains_ci(&part.part_type, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.manufacturer_contains {
            if !contains_ci(&part.manufacturer, needle) {
                return false;
            }
        }
        if let Some(min) = self.price_min {
            if part.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if part.price > max {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Applies the criteria to an in-memory catalog. Pure and total: absent
/// criteria always match, input order is preserved, and malformed criteria
/// have already degraded to "no filtering" at construction time.
pub fn apply(parts: Vec<Part>, criteria: &FilterCriteria) -> Vec<Part> {
    if criteria.is_empty() {
        return parts;
    }
    parts
        .into_iter()
        .filter(|part| criteria.matches(part))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str, part_type: &str, manufacturer: &str, price: f64) -> Part {
        Part {
            id: None,
            name: name.to_string(),
            part_type: part_type.to_string(),
            price,
            manufacturer: manufacturer.to_string(),
            stock: None,
            quantity: None,
            specifications: None,
        }
    }

    fn sample() -> Vec<Part> {
        vec![
            part("Budget fan", "Cooling", "Arctic", 50.0),
            part("Ryzen 5", "CPU", "AMD", 200.0),
            part("Core i7", "CPU", "Intel", 500.0),
            part("RTX 4070", "GPU", "NVIDIA", 600.0),
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let parts = sample();
        let expected = parts.clone();
        let result = apply(parts, &FilterCriteria::default());
        assert_eq!(result, expected);
    }

    #[test]
    fn test_inclusive_price_range() {
        let criteria = FilterCriteria {
            price_min: Some(100.0),
            price_max: Some(500.0),
            ..Default::default()
        };

        let result = apply(sample(), &criteria);
        let prices: Vec<f64> = result.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![200.0, 500.0]);
    }

    #[test]
    fn test_type_substring_is_case_insensitive() {
        let criteria = FilterCriteria {
            type_contains: Some("cpu".to_string()),
            ..Default::default()
        };

        let result = apply(sample(), &criteria);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.part_type == "CPU"));
    }

    #[test]
    fn test_manufacturer_substring_unanchored() {
        let criteria = FilterCriteria {
            manufacturer_contains: Some("vid".to_string()),
            ..Default::default()
        };

        let result = apply(sample(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].manufacturer, "NVIDIA");
    }

    #[test]
    fn test_combined_criteria_preserve_order() {
        let criteria = FilterCriteria {
            type_contains: Some("c".to_string()),
            price_max: Some(500.0),
            ..Default::default()
        };

        let result = apply(sample(), &criteria);
        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Budget fan", "Ryzen 5", "Core i7"]);
    }

    #[test]
    fn test_price_bound_parses_permissively() {
        assert_eq!(FilterCriteria::price_bound(Some("150")), Some(150.0));
        assert_eq!(FilterCriteria::price_bound(Some(" 99.5 ")), Some(99.5));
        assert_eq!(FilterCriteria::price_bound(Some("abc")), None);
        assert_eq!(FilterCriteria::price_bound(Some("")), None);
        assert_eq!(FilterCriteria::price_bound(None), None);
    }

    #[test]
    fn test_bad_bound_degrades_to_always_matches() {
        let criteria = FilterCriteria {
            price_min: FilterCriteria::price_bound(Some("not-a-number")),
            price_max: FilterCriteria::price_bound(Some("oops")),
            ..Default::default()
        };

        assert!(criteria.is_empty());
        let result = apply(sample(), &criteria);
        assert_eq!(result.len(), 4);
    }
}
