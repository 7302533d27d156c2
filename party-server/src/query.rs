//! Star map query parameters.
//!
//! Absent or empty parameters take the defaults below. Title and caption are
//! trimmed and clipped; coordinates are parsed as plain floats with no range
//! check, so an impossible latitude reaches the resolver and yields an empty
//! sky rather than an error.

use ephemeris::ObserverContext;
use serde::Deserialize;
use skychart::footer_text;
use skychart::render::{MAX_CAPTION_CHARS, MAX_TITLE_CHARS};
use skychart::truncate_chars;

use crate::error::{Result, ServerError};

pub const DEFAULT_DATE: &str = "2023-07-14";
pub const DEFAULT_TIME: &str = "21:30";
pub const DEFAULT_LATITUDE: f64 = 32.0853;
pub const DEFAULT_LONGITUDE: f64 = 34.7818;

/// Title drawn on the image when the request carries none
pub const DEFAULT_CHART_TITLE: &str = "The sky we shared";

/// Title pre-filled in the page form
pub const DEFAULT_PAGE_TITLE: &str = "The sky when we met ✨";

/// Caption pre-filled in the page form
pub const DEFAULT_PAGE_CAPTION: &str = "Under this sky, everything began.";

/// Raw `/starmap.png` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StarmapQuery {
    pub date: Option<String>,
    pub time: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
}

/// Validated parameters for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StarmapParams {
    /// Date as given, echoed in the footer
    pub date: String,
    /// Time of day as given, echoed in the footer
    pub time: String,
    pub observer: ObserverContext,
    pub title: String,
    pub caption: Option<String>,
}

impl StarmapParams {
    pub fn from_query(query: &StarmapQuery) -> Result<Self> {
        let date = given(&query.date).unwrap_or(DEFAULT_DATE).to_string();
        let time = given(&query.time).unwrap_or(DEFAULT_TIME).to_string();
        let latitude = parse_coordinate("lat", given(&query.lat), DEFAULT_LATITUDE)?;
        let longitude = parse_coordinate("lon", given(&query.lon), DEFAULT_LONGITUDE)?;

        let title = truncate_chars(
            given(&query.title).unwrap_or(DEFAULT_CHART_TITLE).trim(),
            MAX_TITLE_CHARS,
        );
        let caption = given(&query.caption)
            .map(|c| truncate_chars(c.trim(), MAX_CAPTION_CHARS))
            .filter(|c| !c.is_empty());

        let observer = ObserverContext::parse(&date, &time, latitude, longitude)?;

        Ok(Self {
            date,
            time,
            observer,
            title,
            caption,
        })
    }

    /// Footer line echoing the request's date, time and location.
    pub fn footer(&self) -> String {
        footer_text(
            &self.date,
            &self.time,
            self.observer.latitude_deg,
            self.observer.longitude_deg,
        )
    }
}

/// Values pre-filled in the star map form.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDefaults {
    pub date: String,
    pub time: String,
    pub lat: String,
    pub lon: String,
    pub title: String,
    pub caption: String,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE.to_string(),
            time: DEFAULT_TIME.to_string(),
            lat: DEFAULT_LATITUDE.to_string(),
            lon: DEFAULT_LONGITUDE.to_string(),
            title: DEFAULT_PAGE_TITLE.to_string(),
            caption: DEFAULT_PAGE_CAPTION.to_string(),
        }
    }
}

impl PageDefaults {
    /// Name/value pairs for `data-default-*` attributes.
    pub fn attributes(&self) -> [(&'static str, &str); 6] {
        [
            ("date", self.date.as_str()),
            ("time", self.time.as_str()),
            ("lat", self.lat.as_str()),
            ("lon", self.lon.as_str()),
            ("title", self.title.as_str()),
            ("caption", self.caption.as_str()),
        ]
    }
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_coordinate(field: &'static str, value: Option<&str>, default: f64) -> Result<f64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ServerError::InvalidQuery {
                field,
                reason: format!("'{raw}': {e}"),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn query(pairs: &[(&str, &str)]) -> StarmapQuery {
        let mut q = StarmapQuery::default();
        for (key, value) in pairs {
            let slot = match *key {
                "date" => &mut q.date,
                "time" => &mut q.time,
                "lat" => &mut q.lat,
                "lon" => &mut q.lon,
                "title" => &mut q.title,
                "caption" => &mut q.caption,
                other => panic!("unknown key {other}"),
            };
            *slot = Some(value.to_string());
        }
        q
    }

    #[test]
    fn test_all_defaults() {
        let params = StarmapParams::from_query(&StarmapQuery::default()).unwrap();
        assert_eq!(params.date, "2023-07-14");
        assert_eq!(params.time, "21:30");
        assert_eq!(params.observer.datetime, datetime!(2023-07-14 21:30));
        assert_eq!(params.observer.latitude_deg, 32.0853);
        assert_eq!(params.observer.longitude_deg, 34.7818);
        assert_eq!(params.title, "The sky we shared");
        assert_eq!(params.caption, None);
        assert_eq!(
            params.footer(),
            "2023-07-14 21:30  •  lat 32.0853, lon 34.7818"
        );
    }

    #[test]
    fn test_empty_values_take_defaults() {
        let q = query(&[("date", ""), ("time", ""), ("lat", ""), ("lon", ""), ("title", "")]);
        let params = StarmapParams::from_query(&q).unwrap();
        assert_eq!(params, StarmapParams::from_query(&StarmapQuery::default()).unwrap());
    }

    #[test]
    fn test_explicit_values() {
        let q = query(&[
            ("date", "1999-12-31"),
            ("time", "23:59"),
            ("lat", " -33.8688 "),
            ("lon", "151.2093"),
            ("title", "  Millennium eve  "),
            ("caption", "  see you next century "),
        ]);
        let params = StarmapParams::from_query(&q).unwrap();
        assert_eq!(params.observer.datetime, datetime!(1999-12-31 23:59));
        assert_eq!(params.observer.latitude_deg, -33.8688);
        assert_eq!(params.title, "Millennium eve");
        assert_eq!(params.caption.as_deref(), Some("see you next century"));
        assert_eq!(
            params.footer(),
            "1999-12-31 23:59  •  lat -33.8688, lon 151.2093"
        );
    }

    #[test]
    fn test_whitespace_caption_is_dropped() {
        let params = StarmapParams::from_query(&query(&[("caption", "   ")])).unwrap();
        assert_eq!(params.caption, None);
    }

    #[test]
    fn test_whitespace_title_is_kept_empty() {
        let params = StarmapParams::from_query(&query(&[("title", "   ")])).unwrap();
        assert_eq!(params.title, "");
    }

    #[test]
    fn test_title_and_caption_clipped() {
        let long = "★".repeat(500);
        let q = query(&[("title", long.as_str()), ("caption", long.as_str())]);
        let params = StarmapParams::from_query(&q).unwrap();
        assert_eq!(params.title.chars().count(), 80);
        assert_eq!(params.caption.unwrap().chars().count(), 160);
    }

    #[test]
    fn test_out_of_range_coordinates_are_accepted() {
        let params =
            StarmapParams::from_query(&query(&[("lat", "200"), ("lon", "-720")])).unwrap();
        assert_eq!(params.observer.latitude_deg, 200.0);
        assert_eq!(params.observer.longitude_deg, -720.0);
    }

    #[test]
    fn test_bad_coordinate_is_invalid_query() {
        let err = StarmapParams::from_query(&query(&[("lon", "east")])).unwrap_err();
        assert!(matches!(err, ServerError::InvalidQuery { field: "lon", .. }));
    }

    #[test]
    fn test_bad_date_is_observation_error() {
        for (date, time) in [("2023-02-30", "21:30"), ("14/07/2023", "21:30"), ("2023-07-14", "25:00")] {
            let err = StarmapParams::from_query(&query(&[("date", date), ("time", time)]))
                .unwrap_err();
            assert!(matches!(err, ServerError::Observation(_)), "{date} {time}");
        }
    }

    #[test]
    fn test_page_defaults() {
        let defaults = PageDefaults::default();
        assert_eq!(defaults.lat, "32.0853");
        assert_eq!(defaults.lon, "34.7818");
        assert_eq!(defaults.title, "The sky when we met ✨");
        let names: Vec<_> = defaults.attributes().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["date", "time", "lat", "lon", "title", "caption"]);
    }
}
