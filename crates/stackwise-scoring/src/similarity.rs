use stackwise_core::models::product::Product;

/// Whether an already-tracked product overlaps with the requested one.
///
/// A product matches when its category equals the requested name, or when
/// either name contains the other. All comparisons ignore case.
pub fn is_similar(existing: &Product, requested_name: &str) -> bool {
    let requested = requested_name.to_lowercase();
    let name = existing.name.to_lowercase();
    let same_category = existing.category.as_str().to_lowercase() == requested;
    let name_overlap = name.contains(&requested) || requested.contains(&name);
    same_category || name_overlap
}

/// Existing products that overlap with the requested one, in input order.
pub fn find_similar<'a>(existing: &'a [Product], requested_name: &str) -> Vec<&'a Product> {
    existing
        .iter()
        .filter(|p| is_similar(p, requested_name))
        .collect()
}
