use agriscout_core::error::Result;
use agriscout_core::models::{Land, Partition, Ring};
use agriscout_geo::ring_bounds;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Closed GeoJSON polygon with `[lng, lat]` positions
fn ring_geometry(ring: &Ring) -> Geometry {
    let mut positions: Vec<Vec<f64>> = ring.iter().map(|c| vec![c.lng, c.lat]).collect();
    if let Some(first) = positions.first().cloned() {
        if positions.last() != Some(&first) {
            positions.push(first);
        }
    }
    Geometry::new(GeoJsonValue::Polygon(vec![positions]))
}

/// Entity fields as properties, without the ring
fn properties<T: Serialize>(entity: &T, kind: &str) -> Result<Map<String, JsonValue>> {
    let mut properties = match serde_json::to_value(entity)? {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    };
    properties.remove("coordinates");
    properties.insert("kind".to_string(), JsonValue::from(kind));
    Ok(properties)
}

fn feature<T: Serialize>(entity: &T, id: &str, ring: &Ring, kind: &str) -> Result<Feature> {
    let bbox = ring_bounds(ring).map(|b| vec![b.min_lng, b.min_lat, b.max_lng, b.max_lat]);

    Ok(Feature {
        bbox,
        geometry: Some(ring_geometry(ring)),
        id: Some(Id::String(id.to_string())),
        properties: Some(properties(entity, kind)?),
        foreign_members: None,
    })
}

/// Lands followed by partitions as one feature collection
pub fn fields_to_geojson(lands: &[Land], partitions: &[Partition]) -> Result<FeatureCollection> {
    let mut features = Vec::with_capacity(lands.len() + partitions.len());

    for land in lands {
        features.push(feature(land, land.id.as_str(), &land.ring, "land")?);
    }
    for partition in partitions {
        features.push(feature(partition, partition.id.as_str(), &partition.ring, "partition")?);
    }

    Ok(FeatureCollection { bbox: None, features, foreign_members: None })
}
