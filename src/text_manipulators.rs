use scraper::ElementRef;

/// All text below an HTML element, trimmed the way a browser reports it.
pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// All text below an XML node, trimmed.
pub fn extract_xml_text(node: roxmltree::Node) -> String {
    node.descendants()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Tooltip text is taken as-is, line breaks included.
pub fn extract_xml_payload(node: roxmltree::Node) -> String {
    node.descendants()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}

/// `"8:00 - 9:00"` -> `"8:00"`.
pub fn range_start(label: &str) -> &str {
    label.split(" - ").next().unwrap_or(label)
}

/// Parses a numeric SVG attribute. Units, percentages and non-finite values
/// are rejected.
pub fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}
