use maud::{html, Markup};

pub const ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// Plain route listing served at `/`.
pub fn home_page() -> Markup {
    html! {
        "Welcome to Hawaii Climate API!" br;
        "-----------------------------------" br;
        "Available Routes:" br;
        @for route in ROUTES {
            (route) br;
        }
    }
}
