pub mod leaflet_map;
pub mod workout_form;
pub mod workout_list;
