use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct GeoFix {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Geolocation not supported")]
    Unsupported,
    #[error("Allow location access")]
    Denied,
}

/// Source of the device position used for check-in and check-out.
#[async_trait(?Send)]
pub trait LocationProvider {
    async fn current_fix(&self) -> Result<GeoFix, LocationError>;
}

/// Browser geolocation with a reverse-geocoded address.
#[derive(Clone, Default)]
pub struct BrowserLocation;

#[async_trait(?Send)]
impl LocationProvider for BrowserLocation {
    async fn current_fix(&self) -> Result<GeoFix, LocationError> {
        let (lat, lng) = browser::current_position().await?;
        let address = crate::api::ApiClient::geocoder().address_for(lat, lng).await;
        Ok(GeoFix { lat, lng, address })
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::LocationError;
    use futures::channel::oneshot;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::GeolocationPosition;

    type Reply = Rc<RefCell<Option<oneshot::Sender<Result<(f64, f64), LocationError>>>>>;

    fn reply(sender: &Reply, value: Result<(f64, f64), LocationError>) {
        if let Some(tx) = sender.borrow_mut().take() {
            let _ = tx.send(value);
        }
    }

    pub async fn current_position() -> Result<(f64, f64), LocationError> {
        let geolocation = web_sys::window()
            .and_then(|window| window.navigator().geolocation().ok())
            .ok_or(LocationError::Unsupported)?;

        let (tx, rx) = oneshot::channel();
        let sender: Reply = Rc::new(RefCell::new(Some(tx)));

        let on_success = {
            let sender = Rc::clone(&sender);
            Closure::once_into_js(move |position: GeolocationPosition| {
                let coords = position.coords();
                reply(&sender, Ok((coords.latitude(), coords.longitude())));
            })
        };
        let on_error = {
            let sender = Rc::clone(&sender);
            Closure::once_into_js(move |_err: JsValue| reply(&sender, Err(LocationError::Denied)))
        };

        geolocation
            .get_current_position_with_error_callback(
                on_success.unchecked_ref(),
                Some(on_error.unchecked_ref()),
            )
            .map_err(|err| {
                log::warn!("Geolocation request failed: {:?}", err);
                LocationError::Unsupported
            })?;

        rx.await.unwrap_or(Err(LocationError::Denied))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod browser {
    use super::LocationError;

    pub async fn current_position() -> Result<(f64, f64), LocationError> {
        Err(LocationError::Unsupported)
    }
}
