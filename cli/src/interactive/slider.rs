//! Text gauges standing in for the form's sliders

use diarisk_core::record::SliderRange;

const FILLED: char = '━';
const EMPTY: char = '─';
const THUMB: char = '●';

/// Draw `value` on `range` as a gauge `width` cells wide
///
/// Values outside the range pin the thumb to the nearest end.
pub fn render_slider(range: SliderRange, value: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let thumb = (range.fraction(value) * (width - 1) as f64).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&thumb) {
            std::cmp::Ordering::Less => FILLED,
            std::cmp::Ordering::Equal => THUMB,
            std::cmp::Ordering::Greater => EMPTY,
        })
        .collect()
}

/// `min–max` caption printed after a gauge
pub fn range_caption(range: SliderRange) -> String {
    let decimals = range.decimals();
    format!("{:.*}–{:.*}", decimals, range.min, decimals, range.max)
}
