use std::cmp::Ordering;

use super::{
    grid::{cell_lookup, SampleGrid},
    SampleSize, SortKey, SortOrder,
};
use crate::{color::Rgba, image::Image};

impl SortKey {
    fn of(&self, color: Rgba) -> f32 {
        match self {
            SortKey::Hue => color.hue(),
            SortKey::Luminance => color.luminance(),
        }
    }
}

struct SortEntry {
    cell_key: f32,
    dot_key: f32,
    scan_index: usize,
    color: Rgba,
}

/// Reorders the pixels of `image` by color. Pixels are grouped by the key of
/// the sample taken in their grid cell, then by their own key, then by their
/// original position. The result has the dimensions and pixels of `image`.
pub fn sort_image(
    image: &Image,
    sample_size: SampleSize,
    sort_key: SortKey,
    sort_order: SortOrder,
) -> crate::Result<Image> {
    let grid = SampleGrid::new(image, sample_size)?;
    let cell_keys: Vec<f32> = grid
        .samples()
        .map(|sample| sort_key.of(sample.color))
        .collect();
    let column_cells = cell_lookup(sample_size.width, image.width());
    let row_cells = cell_lookup(sample_size.height, image.height());

    let mut entries = Vec::with_capacity(image.pixel_count());
    for (row_index, row) in image.rows().enumerate() {
        let cell_row = row_cells[row_index] as usize;
        for (column_index, &color) in row.iter().enumerate() {
            let cell_column = column_cells[column_index] as usize;
            entries.push(SortEntry {
                cell_key: cell_keys[cell_row * sample_size.width as usize + cell_column],
                dot_key: sort_key.of(color),
                scan_index: entries.len(),
                color,
            });
        }
    }
    entries.sort_by(|a, b| compare(a, b, sort_order));
    log::debug!(
        "Sorted {} pixels by {:?} in {:?} order",
        entries.len(),
        sort_key,
        sort_order
    );
    let dots = entries.into_iter().map(|entry| entry.color).collect();
    Image::new(image.width(), image.height(), dots)
}

fn compare(a: &SortEntry, b: &SortEntry, sort_order: SortOrder) -> Ordering {
    let by_key =
        compare_keys(a.cell_key, b.cell_key).then(compare_keys(a.dot_key, b.dot_key));
    let by_key = match sort_order {
        SortOrder::Ascending => by_key,
        SortOrder::Descending => by_key.reverse(),
    };
    by_key.then(a.scan_index.cmp(&b.scan_index))
}

// keys are never NaN, and -0.0 must tie with 0.0
fn compare_keys(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
