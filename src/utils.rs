use crate::types::Point;
use web_sys::{FileList, MouseEvent};

/// Pointer position in client pixels. Only deltas between events are used,
/// so the origin does not matter.
pub fn client_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

/// Parse a numeric form value, rejecting NaN and infinities
pub fn parse_number(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Read every selected file as a `data:` URL, skipping files that fail
pub async fn read_data_urls(files: Option<FileList>) -> Vec<String> {
    let Some(files) = files else {
        return Vec::new();
    };

    let mut urls = Vec::new();
    for index in 0..files.length() {
        let Some(file) = files.item(index) else {
            continue;
        };
        let file = gloo::file::File::from(file);
        match gloo::file::futures::read_as_data_url(&file).await {
            Ok(url) => urls.push(url),
            Err(err) => log::error!("failed to read {}: {}", file.name(), err),
        }
    }
    urls
}
