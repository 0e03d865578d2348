mod ai;
mod assistant;
mod fields;
mod health;
mod session;

pub use ai::{
    analyze_crop, analyze_soil, forecast_weather, insight_chat, interventions, list_services,
};
pub use assistant::assistant_chat;
pub use fields::{
    delete_land, delete_partition, get_land, lands_geojson, list_lands, list_partitions,
    set_selection, update_land, update_partition,
};
pub use health::{health_check, service_info};
pub use session::{
    advance_phase, cancel_drawing, choose_location, click, close_editor, finish_drawing,
    get_session, set_phase, start_drawing, undo_point,
};
