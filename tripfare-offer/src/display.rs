//! Text shown next to each result card.

/// Compact duration label: `PT2H30M` becomes `2h 30m`, short-form values
/// pass through, and a missing duration shows as `--`.
pub fn format_duration_label(duration: Option<&str>) -> String {
    match duration {
        None | Some("") => "--".to_string(),
        Some(d) => d.replacen("PT", "", 1).replacen('H', "h ", 1).replacen('M', "m", 1),
    }
}

pub fn stops_label(stops: i64) -> String {
    if stops == 0 {
        "Non-stop".to_string()
    } else {
        format!("{} Stop", stops)
    }
}
