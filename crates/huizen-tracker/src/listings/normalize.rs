use thiserror::Error;

use super::domain::{House, RawListing};
use super::status::Status;

/// A raw listing that cannot become a tracked house: the identifier,
/// price, and living area are required downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("listing has no source identifier")]
    MissingId,
    #[error("listing has no asking price")]
    MissingPrice,
    #[error("listing has no living area")]
    MissingArea,
}

/// Map one raw search result into the persisted entity shape.
///
/// New houses always enter the board as `nieuw` with no mutation
/// timestamp; the absolute url is the source origin plus the raw
/// detail path.
pub fn normalize(raw: &RawListing, origin: &str) -> Result<House, NormalizationError> {
    let id = raw.id.clone().ok_or(NormalizationError::MissingId)?;
    let price = raw.price.ok_or(NormalizationError::MissingPrice)?;
    let surface_m2 = raw.living_area.ok_or(NormalizationError::MissingArea)?;

    Ok(House {
        id,
        address: raw.title.clone().unwrap_or_default(),
        neighbourhood: raw.neighbourhood.clone(),
        city: raw.city.clone(),
        price,
        surface_m2,
        bedrooms: raw.bedrooms.unwrap_or_default(),
        url: listing_url(origin, raw.detail_url.as_deref()),
        status: Status::New,
        last_updated: None,
    })
}

fn listing_url(origin: &str, detail_path: Option<&str>) -> String {
    let origin = origin.trim_end_matches('/');
    match detail_path {
        Some(path) if path.starts_with('/') => format!("{origin}{path}"),
        Some(path) => format!("{origin}/{path}"),
        None => origin.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.funda.nl";

    fn raw() -> RawListing {
        RawListing {
            id: Some("43210987".to_string()),
            title: Some("Lindengracht 5".to_string()),
            neighbourhood: Some("Jordaan".to_string()),
            city: Some("Amsterdam".to_string()),
            price: Some(525_000),
            living_area: Some(62),
            bedrooms: Some(2),
            postcode: Some("1015 KK".to_string()),
            detail_url: Some("/detail/koop/amsterdam/appartement-lindengracht-5/43210987/".to_string()),
            availability: Some("beschikbaar".to_string()),
        }
    }

    #[test]
    fn maps_raw_fields_onto_the_house() {
        let house = normalize(&raw(), ORIGIN).expect("normalizes");

        assert_eq!(house.id, "43210987");
        assert_eq!(house.address, "Lindengracht 5");
        assert_eq!(house.neighbourhood.as_deref(), Some("Jordaan"));
        assert_eq!(house.price, 525_000);
        assert_eq!(house.surface_m2, 62);
        assert_eq!(house.bedrooms, 2);
        assert_eq!(
            house.url,
            "https://www.funda.nl/detail/koop/amsterdam/appartement-lindengracht-5/43210987/"
        );
    }

    #[test]
    fn new_houses_enter_at_the_initial_status_without_timestamp() {
        let house = normalize(&raw(), ORIGIN).expect("normalizes");
        assert_eq!(house.status, Status::New);
        assert!(house.last_updated.is_none());
    }

    #[test]
    fn missing_required_fields_fail() {
        let mut no_id = raw();
        no_id.id = None;
        assert_eq!(normalize(&no_id, ORIGIN), Err(NormalizationError::MissingId));

        let mut no_price = raw();
        no_price.price = None;
        assert_eq!(
            normalize(&no_price, ORIGIN),
            Err(NormalizationError::MissingPrice)
        );

        let mut no_area = raw();
        no_area.living_area = None;
        assert_eq!(
            normalize(&no_area, ORIGIN),
            Err(NormalizationError::MissingArea)
        );
    }

    #[test]
    fn url_composition_handles_slashes() {
        let mut listing = raw();
        listing.detail_url = Some("detail/koop/amsterdam/huis-1/99/".to_string());
        let house = normalize(&listing, "https://www.funda.nl/").expect("normalizes");
        assert_eq!(house.url, "https://www.funda.nl/detail/koop/amsterdam/huis-1/99/");
    }

    #[test]
    fn optional_descriptive_fields_may_be_absent() {
        let mut listing = raw();
        listing.title = None;
        listing.bedrooms = None;
        listing.neighbourhood = None;

        let house = normalize(&listing, ORIGIN).expect("normalizes");
        assert_eq!(house.address, "");
        assert_eq!(house.bedrooms, 0);
        assert!(house.neighbourhood.is_none());
    }
}
