use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseStatus {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub lat: f64,
    pub lng: f64,
}
