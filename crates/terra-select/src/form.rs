//! Recommendation form model.
//!
//! The form owns the values the two controls feed: a soil profile picked
//! through the remote soil search and a crop picked from the local crop
//! list. [`bind_soil_search`] and [`bind_crop_select`] connect controls to a
//! shared form.

use std::sync::Arc;

use parking_lot::Mutex;
use terra_select_core::ConnectionId;
use terra_select_net::{AgronomyClient, Recommendation, RecommendationRequest};

use crate::combobox::{CandidateItem, Combobox, LocalItem, LocalSource, RemoteSource, SearchBackend};
use crate::error::{Result, SelectError};

/// Values entered on the recommendation form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationForm {
    pub crop_type: String,
    pub soil_name: String,
    pub soil_type: String,
    pub soil_ph: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub organic_matter: Option<f64>,
    pub moisture: Option<f64>,
    pub temperature: Option<f64>,
}

impl RecommendationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the soil fields from a soil search record.
    ///
    /// Fields the record does not carry keep their current value, except
    /// `soil_type`, which is always replaced.
    pub fn apply_soil(&mut self, soil: &CandidateItem) {
        if let Some(location) = soil.text("location") {
            let district = soil.text("district").unwrap_or_default();
            self.soil_name = format!("{location}, {district}");
        }
        self.soil_type = soil.text("soil_type").unwrap_or_default().to_lowercase();

        let fields = [
            ("ph", &mut self.soil_ph),
            ("nitrogen", &mut self.nitrogen),
            ("phosphorus", &mut self.phosphorus),
            ("potassium", &mut self.potassium),
            ("organic_matter", &mut self.organic_matter),
            ("moisture", &mut self.moisture),
            ("temperature", &mut self.temperature),
        ];
        for (field, slot) in fields {
            if let Some(value) = soil.number(field) {
                *slot = Some(value);
            }
        }

        tracing::debug!(
            target: "terra_select::form",
            soil_name = %self.soil_name,
            soil_type = %self.soil_type,
            "soil profile applied"
        );
    }

    pub fn set_crop(&mut self, value: impl Into<String>) {
        self.crop_type = value.into();
    }

    /// Check that every required field is present.
    ///
    /// # Errors
    ///
    /// [`SelectError::Validation`] listing the missing fields in form order.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.crop_type.is_empty() {
            missing.push("crop_type");
        }
        let numeric = [
            ("soil_ph", self.soil_ph),
            ("nitrogen", self.nitrogen),
            ("phosphorus", self.phosphorus),
            ("potassium", self.potassium),
        ];
        missing.extend(
            numeric
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| name),
        );

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SelectError::Validation { missing })
        }
    }

    /// Build the request body sent to the backend.
    pub fn to_request(&self) -> Result<RecommendationRequest> {
        self.validate()?;
        Ok(RecommendationRequest {
            crop_type: self.crop_type.clone(),
            soil_name: self.soil_name.clone(),
            soil_type: self.soil_type.clone(),
            soil_ph: self.soil_ph.unwrap_or_default(),
            nitrogen: self.nitrogen.unwrap_or_default(),
            phosphorus: self.phosphorus.unwrap_or_default(),
            potassium: self.potassium.unwrap_or_default(),
            organic_matter: self.organic_matter,
            moisture: self.moisture,
            temperature: self.temperature,
        })
    }

    /// Validate and submit the form.
    pub async fn submit(&self, client: &AgronomyClient) -> Result<Vec<Recommendation>> {
        let request = self.to_request()?;
        let recommendations = client.recommend(&request).await?;
        tracing::debug!(
            target: "terra_select::form",
            crop = %request.crop_type,
            count = recommendations.len(),
            "recommendations received"
        );
        Ok(recommendations)
    }
}

/// Apply every soil picked in `control` to `form`.
pub fn bind_soil_search<B: SearchBackend>(
    control: &Combobox<RemoteSource<B>>,
    form: Arc<Mutex<RecommendationForm>>,
) -> ConnectionId {
    control.activated.connect(move |soil: &CandidateItem| {
        form.lock().apply_soil(soil);
    })
}

/// Keep `form.crop_type` in step with `control`.
///
/// Returns the activation and clear connections.
pub fn bind_crop_select(
    control: &Combobox<LocalSource>,
    form: Arc<Mutex<RecommendationForm>>,
) -> (ConnectionId, ConnectionId) {
    let on_pick = form.clone();
    let activated = control.activated.connect(move |crop: &LocalItem| {
        on_pick.lock().set_crop(crop.value.clone());
    });
    let cleared = control.cleared.connect(move |_: &()| {
        form.lock().set_crop("");
    });
    (activated, cleared)
}
