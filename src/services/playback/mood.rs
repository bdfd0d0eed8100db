use crate::models::playback::Mood;

/// Picks the mood for the page section currently in view. The page is split
/// into viewport-high sections: the first is romantic, the next three lo-fi,
/// everything below that bollywood.
pub fn mood_for_section(scroll_offset: f64, viewport_height: f64) -> Mood {
    let section = scroll_offset / viewport_height;
    if viewport_height <= 0.0 || !section.is_finite() || section < 1.0 {
        return Mood::Romantic;
    }

    match section.floor() as u64 {
        0 => Mood::Romantic,
        1..=3 => Mood::LoFi,
        _ => Mood::Bollywood,
    }
}
