// Declarative style configuration handed to the engine at startup, plus the
// boundary layer descriptors added once the engine reports ready.
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::expressions::{get_field, zoom_interpolation};
use crate::interaction::no_selection_filter;

// Source ids
pub const PALE_SOURCE: &str = "pale";
pub const PHOTO_SOURCE: &str = "seamlessphoto";
pub const PARCEL_SOURCE: &str = "parcels";
pub const BOUNDARY_SOURCE: &str = "district-boundary";

// Layer ids
pub const PALE_LAYER: &str = "pale-layer";
pub const PHOTO_LAYER: &str = "seamlessphoto-layer";
pub const PARCEL_LINE_LAYER: &str = "parcel-line";
pub const PARCEL_TEXT_LAYER: &str = "parcel-text";
pub const BOUNDARY_LINE_LAYER: &str = "boundary-line";
pub const BOUNDARY_TEXT_LAYER: &str = "boundary-text";
pub const BOUNDARY_FILL_LAYER: &str = "boundary-fill";
pub const BOUNDARY_SELECTED_LAYER: &str = "boundary-selected";

/// Field identifying a district in the boundary dataset.
pub const DISTRICT_NAME_FIELD: &str = "S_NAME";
/// Field carrying a parcel's display label in the vector tiles.
pub const PARCEL_LABEL_FIELD: &str = "表示名称";

const GLYPHS_URL: &str = "https://demotiles.maplibre.org/font/{fontstack}/{range}.pbf";
const PALE_TILES: &str = "https://cyberjapandata.gsi.go.jp/xyz/pale/{z}/{x}/{y}.png";
const PHOTO_TILES: &str = "https://cyberjapandata.gsi.go.jp/xyz/seamlessphoto/{z}/{x}/{y}.jpg";
const TEXT_FONTS: [&str; 2] = ["Open Sans Regular", "Arial Unicode MS Regular"];

/// The style document consumed once by the engine at construction.
#[derive(Serialize)]
pub struct StyleDocument {
    pub version: u32,
    pub glyphs: String,
    pub sources: HashMap<String, Source>,
    pub layers: Vec<Layer>,
}

/// A data source in the engine's style schema.
#[derive(Serialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    Raster {
        tiles: Vec<String>,
        #[serde(rename = "tileSize")]
        tile_size: u32,
        attribution: String,
        maxzoom: u32,
    },
    Vector {
        url: String,
    },
    Geojson {
        data: String,
    },
}

/// A layer in the engine's style schema. Paint and layout blocks are kept as
/// raw expression values since their keys vary per layer type.
#[derive(Serialize, Clone)]
pub struct Layer {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    pub source: String,
    #[serde(rename = "source-layer", skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paint: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
}

impl Layer {
    fn new(id: &str, layer_type: &str, source: &str) -> Self {
        Layer {
            id: id.to_string(),
            layer_type: layer_type.to_string(),
            source: source.to_string(),
            source_layer: None,
            minzoom: None,
            maxzoom: None,
            layout: None,
            paint: None,
            filter: None,
        }
    }
}

/// Opacity ramp of the aerial photo layer. The background toggle restores
/// this exact expression when the checkbox is re-enabled.
pub fn photo_opacity_ramp() -> Value {
    zoom_interpolation(&[(16.5, 0.0), (17.5, 0.6)])
}

/// Startup style: two GSI raster base layers and the parcel overlay served
/// from the PMTiles archive.
pub fn viewer_style(parcel_tiles_url: &str, parcel_source_layer: &str) -> StyleDocument {
    let mut sources = HashMap::new();
    sources.insert(
        PALE_SOURCE.to_string(),
        Source::Raster {
            tiles: vec![PALE_TILES.to_string()],
            tile_size: 256,
            attribution: "地理院タイル（淡色）".to_string(),
            maxzoom: 18,
        },
    );
    sources.insert(
        PHOTO_SOURCE.to_string(),
        Source::Raster {
            tiles: vec![PHOTO_TILES.to_string()],
            tile_size: 256,
            attribution: "地理院シームレス写真".to_string(),
            maxzoom: 18,
        },
    );
    sources.insert(
        PARCEL_SOURCE.to_string(),
        Source::Vector {
            url: parcel_tiles_url.to_string(),
        },
    );

    StyleDocument {
        version: 8,
        glyphs: GLYPHS_URL.to_string(),
        sources,
        layers: vec![
            Layer {
                minzoom: Some(0.0),
                maxzoom: Some(18.0),
                ..Layer::new(PALE_LAYER, "raster", PALE_SOURCE)
            },
            // The photo layer fades in over the pale map from zoom 16.5
            Layer {
                minzoom: Some(16.5),
                maxzoom: Some(20.1),
                paint: Some(json!({ "raster-opacity": photo_opacity_ramp() })),
                ..Layer::new(PHOTO_LAYER, "raster", PHOTO_SOURCE)
            },
            Layer {
                source_layer: Some(parcel_source_layer.to_string()),
                minzoom: Some(15.0),
                paint: Some(json!({
                    "line-color": "#d34eed",
                    "line-width": 1.6,
                    "line-opacity": zoom_interpolation(&[(15.0, 0.0), (16.5, 1.0)])
                })),
                ..Layer::new(PARCEL_LINE_LAYER, "line", PARCEL_SOURCE)
            },
            // Parcel labels come in later than the lines to keep dense blocks readable
            Layer {
                source_layer: Some(parcel_source_layer.to_string()),
                minzoom: Some(17.8),
                layout: Some(json!({
                    "text-field": get_field(PARCEL_LABEL_FIELD),
                    "text-font": TEXT_FONTS,
                    "text-size": 18,
                    "text-anchor": "center"
                })),
                paint: Some(json!({
                    "text-color": "#d34eed",
                    "text-halo-color": "rgba(255, 255, 255, 0.6)",
                    "text-halo-width": 4
                })),
                ..Layer::new(PARCEL_TEXT_LAYER, "symbol", PARCEL_SOURCE)
            },
        ],
    }
}

/// The district boundary dataset, fetched by the engine itself.
pub fn boundary_source(boundary_url: &str) -> Source {
    Source::Geojson {
        data: boundary_url.to_string(),
    }
}

/// Boundary layers in paint order: outline, labels, the transparent hit-test
/// fill and the selection highlight on top.
pub fn boundary_layers() -> Vec<Layer> {
    vec![
        Layer {
            maxzoom: Some(18.0),
            paint: Some(json!({
                "line-color": "#5c5ee6",
                "line-width": 2,
                "line-opacity": zoom_interpolation(&[(16.8, 1.0), (17.8, 0.0)])
            })),
            ..Layer::new(BOUNDARY_LINE_LAYER, "line", BOUNDARY_SOURCE)
        },
        Layer {
            minzoom: Some(10.0),
            maxzoom: Some(14.0),
            layout: Some(json!({
                "text-field": get_field(DISTRICT_NAME_FIELD),
                "text-font": TEXT_FONTS,
                "text-size": 16,
                "text-anchor": "center"
            })),
            paint: Some(json!({
                "text-color": "#5c5ee6",
                "text-halo-color": "rgba(255, 255, 255, 0.8)",
                "text-halo-width": 2
            })),
            ..Layer::new(BOUNDARY_TEXT_LAYER, "symbol", BOUNDARY_SOURCE)
        },
        Layer {
            minzoom: Some(10.0),
            maxzoom: Some(14.0),
            paint: Some(json!({
                "fill-color": "transparent",
                "fill-opacity": 0
            })),
            ..Layer::new(BOUNDARY_FILL_LAYER, "fill", BOUNDARY_SOURCE)
        },
        Layer {
            minzoom: Some(10.0),
            maxzoom: Some(14.0),
            paint: Some(json!({
                "fill-color": "#edad79",
                "fill-opacity": 0.3,
                "fill-outline-color": "#5c5ee6"
            })),
            filter: Some(no_selection_filter()),
            ..Layer::new(BOUNDARY_SELECTED_LAYER, "fill", BOUNDARY_SOURCE)
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_style_declares_all_sources_and_layers() {
        let style = viewer_style("pmtiles://./tiles/parcels.pmtiles", "parcels-layer");
        let doc = serde_json::to_value(&style).unwrap();

        assert_eq!(doc["version"], json!(8));
        assert!(doc["glyphs"].as_str().unwrap().contains("{fontstack}"));

        let sources = doc["sources"].as_object().unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[PALE_SOURCE]["type"], json!("raster"));
        assert_eq!(sources[PALE_SOURCE]["tileSize"], json!(256));
        assert_eq!(sources[PHOTO_SOURCE]["maxzoom"], json!(18));
        assert_eq!(
            sources[PARCEL_SOURCE],
            json!({ "type": "vector", "url": "pmtiles://./tiles/parcels.pmtiles" })
        );

        let ids: Vec<&str> = doc["layers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![PALE_LAYER, PHOTO_LAYER, PARCEL_LINE_LAYER, PARCEL_TEXT_LAYER]
        );
    }

    #[test]
    fn photo_layer_uses_the_shared_opacity_ramp() {
        let style = viewer_style("pmtiles://x.pmtiles", "x-layer");
        let doc = serde_json::to_value(&style).unwrap();

        assert_eq!(doc["layers"][1]["paint"]["raster-opacity"], photo_opacity_ramp());
        assert_eq!(
            photo_opacity_ramp(),
            json!(["interpolate", ["linear"], ["zoom"], 16.5, 0.0, 17.5, 0.6])
        );
    }

    #[test]
    fn parcel_layers_reference_the_configured_source_layer() {
        let style = viewer_style("pmtiles://x.pmtiles", "chiban-layer");
        let doc = serde_json::to_value(&style).unwrap();

        assert_eq!(doc["layers"][2]["source-layer"], json!("chiban-layer"));
        assert_eq!(doc["layers"][3]["source-layer"], json!("chiban-layer"));
        assert_eq!(
            doc["layers"][3]["layout"]["text-field"],
            json!(["get", PARCEL_LABEL_FIELD])
        );
    }

    #[test]
    fn omitted_layer_fields_stay_out_of_the_document() {
        let style = viewer_style("pmtiles://x.pmtiles", "x-layer");
        let doc = serde_json::to_value(&style).unwrap();

        // Raster layers carry no layout/paint/filter/source-layer keys
        let pale = doc["layers"][0].as_object().unwrap();
        assert!(!pale.contains_key("layout"));
        assert!(!pale.contains_key("filter"));
        assert!(!pale.contains_key("source-layer"));
    }

    #[test]
    fn boundary_layers_end_with_hit_test_and_highlight() {
        let layers = boundary_layers();
        let ids: Vec<&str> = layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                BOUNDARY_LINE_LAYER,
                BOUNDARY_TEXT_LAYER,
                BOUNDARY_FILL_LAYER,
                BOUNDARY_SELECTED_LAYER
            ]
        );

        // The hit-test fill is fully transparent but still rendered
        let fill = serde_json::to_value(&layers[2]).unwrap();
        assert_eq!(fill["paint"]["fill-opacity"], json!(0));

        // The highlight starts with nothing selected
        assert_eq!(layers[3].filter, Some(no_selection_filter()));
    }

    #[test]
    fn boundary_source_points_the_engine_at_the_dataset() {
        let source = serde_json::to_value(boundary_source("./border.geojson")).unwrap();
        assert_eq!(source, json!({ "type": "geojson", "data": "./border.geojson" }));
    }
}
