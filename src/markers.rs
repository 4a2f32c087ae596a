//! Map marker layout for the province overview.
//!
//! Markers are placed from a fixed name → coordinate table; provinces missing
//! from the table are left off the map. Size and colour scale with the
//! province's share of the largest unit count.

use crate::dataset::Province;
use serde::Serialize;

/// Markers handed to the renderer per frame.
pub const MARKER_BATCH: usize = 5;

/// Province centres, (name, latitude, longitude).
const PROVINCE_COORDINATES: [(&str, f64, f64); 63] = [
    ("Hà Nội", 21.0285, 105.8542),
    ("TP HCM", 10.8231, 106.6297),
    ("Đà Nẵng", 16.0544, 108.2022),
    ("Hải Phòng", 20.8449, 106.6881),
    ("Cần Thơ", 10.0452, 105.7469),
    ("An Giang", 10.5216, 105.1259),
    ("Bà Rịa - Vũng Tàu", 10.5417, 107.2429),
    ("Bắc Giang", 21.2819, 106.1975),
    ("Bắc Kạn", 22.1443, 105.8345),
    ("Bạc Liêu", 9.294, 105.7215),
    ("Bắc Ninh", 21.1214, 106.111),
    ("Bến Tre", 10.2415, 106.3759),
    ("Bình Định", 13.783, 109.2197),
    ("Bình Dương", 11.1654, 106.6518),
    ("Bình Phước", 11.7512, 106.7235),
    ("Bình Thuận", 10.9279, 108.0721),
    ("Cà Mau", 9.1771, 105.1522),
    ("Cao Bằng", 22.6356, 106.2522),
    ("Đắk Lắk", 12.71, 108.2378),
    ("Đắk Nông", 12.2646, 107.6098),
    ("Điện Biên", 21.386, 103.0166),
    ("Đồng Nai", 10.9467, 107.2429),
    ("Đồng Tháp", 10.4938, 105.6882),
    ("Gia Lai", 13.9833, 108.0),
    ("Hà Giang", 22.8026, 104.9784),
    ("Hà Nam", 20.5835, 105.923),
    ("Hà Tĩnh", 18.342, 105.9057),
    ("Hải Dương", 20.9373, 106.3146),
    ("Hậu Giang", 9.7579, 105.6412),
    ("Hòa Bình", 20.8133, 105.3384),
    ("Hưng Yên", 20.6464, 106.0514),
    ("Khánh Hòa", 12.2388, 109.1967),
    ("Kiên Giang", 10.0125, 105.0809),
    ("Kon Tum", 14.3498, 108.0005),
    ("Lai Châu", 22.3864, 103.4703),
    ("Lâm Đồng", 11.9405, 108.4419),
    ("Lạng Sơn", 21.8537, 106.7617),
    ("Lào Cai", 22.481, 103.9755),
    ("Long An", 10.6956, 106.2431),
    ("Nam Định", 20.4174, 106.1682),
    ("Nghệ An", 18.6701, 105.6813),
    ("Ninh Bình", 20.2539, 105.9745),
    ("Ninh Thuận", 11.5753, 108.9889),
    ("Phú Thọ", 21.3014, 105.2417),
    ("Phú Yên", 13.0955, 109.3207),
    ("Quảng Bình", 17.4694, 106.6226),
    ("Quảng Nam", 15.5394, 108.0191),
    ("Quảng Ngãi", 15.1203, 108.8044),
    ("Quảng Ninh", 21.0064, 107.2925),
    ("Quảng Trị", 16.8169, 107.1),
    ("Sóc Trăng", 9.6004, 105.98),
    ("Sơn La", 21.3256, 103.9188),
    ("Tây Ninh", 11.3135, 106.098),
    ("Thái Bình", 20.4463, 106.3366),
    ("Thái Nguyên", 21.5928, 105.8442),
    ("Thanh Hóa", 19.8067, 105.7851),
    ("Thừa Thiên Huế", 16.4674, 107.5905),
    ("Tiền Giang", 10.4493, 106.342),
    ("Trà Vinh", 9.9347, 106.3455),
    ("Tuyên Quang", 21.8237, 105.214),
    ("Vĩnh Long", 10.2395, 105.9722),
    ("Vĩnh Phúc", 21.3089, 105.6047),
    ("Yên Bái", 21.7168, 104.8986),
];

pub fn coordinates(province: &str) -> Option<(f64, f64)> {
    PROVINCE_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == province)
        .map(|&(_, lat, lon)| (lat, lon))
}

/// Inline map or the fullscreen modal; they differ only in marker radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapView {
    Inline,
    Fullscreen,
}

impl MapView {
    fn radius(&self, intensity: f64) -> f64 {
        match self {
            MapView::Inline => 8.0 + intensity * 15.0,
            MapView::Fullscreen => 12.0 + intensity * 25.0,
        }
    }
}

pub fn color_for_intensity(intensity: f64) -> &'static str {
    if intensity > 0.7 {
        "#8B0000"
    } else if intensity > 0.4 {
        "#FF6B6B"
    } else {
        "#FFE5E5"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub position: (f64, f64),
    pub radius: f64,
    pub color: &'static str,
    pub total_units: usize,
    pub merged_units: usize,
    pub unchanged_units: usize,
}

/// Lazily lay out markers in province order, skipping unknown names.
pub fn markers(provinces: &[Province], view: MapView) -> impl Iterator<Item = Marker> + '_ {
    let max_units = provinces.iter().map(|p| p.total_units).max().unwrap_or(0);

    provinces.iter().filter_map(move |province| {
        let Some(position) = coordinates(&province.name) else {
            log::trace!("No coordinates for {}", province.name);
            return None;
        };
        let intensity = if max_units == 0 {
            0.0
        } else {
            province.total_units as f64 / max_units as f64
        };

        Some(Marker {
            id: province.id.clone(),
            name: province.name.clone(),
            position,
            radius: view.radius(intensity),
            color: color_for_intensity(intensity),
            total_units: province.total_units,
            merged_units: province.merged_units,
            unchanged_units: province.unchanged_units,
        })
    })
}

/// Group markers into render batches of [`MARKER_BATCH`].
pub fn batches<I>(markers: I) -> impl Iterator<Item = Vec<Marker>>
where
    I: IntoIterator<Item = Marker>,
{
    let mut markers = markers.into_iter();
    std::iter::from_fn(move || {
        let batch: Vec<Marker> = markers.by_ref().take(MARKER_BATCH).collect();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    })
}
