/// Undergraduate taught students.
pub const UGT: &str = "UGT";
/// Postgraduate taught students.
pub const PGT: &str = "PGT";
/// Postgraduate research students.
pub const PGR: &str = "PGR";
pub const STAFF: &str = "Staff";

/// Expand an audience label into the category names to query.
///
/// Group labels expand to their member categories. Any label outside the
/// canonical table is passed through unchanged so categories added to the
/// store later can be requested without a code change.
pub fn resolve_audience(label: &str) -> Vec<String> {
    let categories: &[&str] = match label {
        "UGT" => &[UGT],
        "PGT" => &[PGT],
        "PGR" => &[PGR],
        "Staff" => &[STAFF],
        "Students_all" => &[UGT, PGT, PGR],
        "Students_taught" => &[UGT, PGT],
        "All" => &[UGT, PGT, PGR, STAFF],
        other => return vec![other.to_string()],
    };

    categories.iter().map(|c| c.to_string()).collect()
}

/// Remove repeated names while keeping first-seen order.
pub fn dedup_categories(categories: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories {
        if !unique.contains(category) {
            unique.push(category.clone());
        }
    }
    unique
}
