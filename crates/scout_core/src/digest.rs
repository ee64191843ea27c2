use crate::ValidUrl;

/// Renders the plain-text email body for newly valid URLs: a timestamped
/// header followed by one line per URL.
pub fn render_digest(new_valid: &[ValidUrl], timestamp: &str) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "New valid URLs detected at {timestamp} ({} total):\n\n",
        new_valid.len()
    ));
    for valid in new_valid {
        body.push_str(&format!("{} (value {})\n", valid.url, valid.value));
    }
    body
}
