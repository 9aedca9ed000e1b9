use std::cmp::Reverse;

use super::model::Product;

/// Sort orders offered by the product list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOption {
    Name,
    PriceLowToHigh,
    PriceHighToLow,
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOption::Name => write!(f, "name"),
            SortOption::PriceLowToHigh => write!(f, "price_low"),
            SortOption::PriceHighToLow => write!(f, "price_high"),
        }
    }
}

impl std::str::FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortOption::Name),
            "price_low" => Ok(SortOption::PriceLowToHigh),
            "price_high" => Ok(SortOption::PriceHighToLow),
            _ => Err(format!("Invalid sort option: {}", s)),
        }
    }
}

/// Filters products by a case-insensitive search query and sorts the
/// result.
///
/// A match is a substring hit on the product name or on the price text. An
/// empty or whitespace-only query keeps every product. Name ordering is
/// case-insensitive lexicographic; price ordering is numeric, with
/// non-canonical prices treated as zero.
pub fn search_and_sort(products: &[Product], query: &str, sort: SortOption) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    let mut list: Vec<Product> = products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.price.as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    match sort {
        SortOption::Name => {
            list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortOption::PriceLowToHigh => list.sort_by_key(|p| p.price.cents().unwrap_or(0)),
        SortOption::PriceHighToLow => {
            list.sort_by_key(|p| Reverse(p.price.cents().unwrap_or(0)));
        }
    }
    list
}
