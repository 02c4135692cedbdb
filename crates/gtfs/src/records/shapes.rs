use serde::Serialize;

/// One `shapes.txt` point. Shapes in this feed connect station
/// coordinates in calling order; points are sequenced from 0.
/// See <https://gtfs.org/schedule/reference/#shapestxt>
#[derive(Debug, Clone, Serialize)]
pub struct ShapePoint {
    pub shape_id: String,

    #[serde(rename = "shape_pt_lat")]
    pub latitude: f64,

    #[serde(rename = "shape_pt_lon")]
    pub longitude: f64,

    #[serde(rename = "shape_pt_sequence")]
    pub sequence: u32,
}
