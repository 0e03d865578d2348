//! Geocode command implementation

use crate::cli::GeocodeArgs;
use crate::config_loader::{load_config_with_overrides, request_timeout};
use crate::output::OutputWriter;
use crate::output_types::GeocodeOutput;
use agriscout_core::config::CliConfigOverrides;
use agriscout_core::models::Coordinate;
use agriscout_geo::NominatimGeocoder;
use anyhow::Result;
use std::path::Path;

pub async fn execute(
    args: GeocodeArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let overrides = CliConfigOverrides { geocoder_url: args.geocoder_url, ..Default::default() };
    let config = load_config_with_overrides(config_path, overrides)?;

    let geocoder = NominatimGeocoder::new(&config.geocoder_url.value, request_timeout(&config))?;
    let coordinate = Coordinate::new(args.lat, args.lng);

    let result = match geocoder.lookup(coordinate).await {
        Ok(address) => GeocodeOutput { lat: args.lat, lng: args.lng, address, resolved: true },
        Err(e) => {
            output.warning(format!("Reverse geocoding failed: {}", e));
            GeocodeOutput {
                lat: args.lat,
                lng: args.lng,
                address: coordinate.display_short(),
                resolved: false,
            }
        }
    };

    if output.is_json() {
        return output.result(result);
    }

    output.kv("Coordinate", coordinate.display_short());
    output.kv("Address", &result.address);
    if !result.resolved {
        output.info(format!("Showing coordinates; {} did not answer", geocoder.base_url()));
    }

    Ok(())
}
