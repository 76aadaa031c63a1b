use crate::{client::Backend, field, message::PremiumRequest, view::FormView};
use cupid_core::error::Error;

/// Alert shown when the contact number is blank.
const MISSING_CONTACT: &str = "Please provide your contact number";

/// Alert shown when the request could not be filed.
const REQUEST_FAILED: &str = "Failed to submit request. Please try again.";

/// Controller of the premium services request form.
#[derive(Debug, Clone, Default)]
pub struct PremiumForm<V> {
    /// The form surface.
    view: V,
}

impl<V: FormView> PremiumForm<V> {
    /// Creates a new instance.
    #[inline]
    pub fn new(view: V) -> Self {
        Self { view }
    }

    /// Returns a reference to the view.
    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns a mutable reference to the view.
    #[inline]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the controller and returns the view.
    #[inline]
    pub fn into_view(self) -> V {
        self.view
    }

    /// Files the premium services request.
    ///
    /// The contact number is only checked for blankness.
    pub async fn submit<B: Backend>(&mut self, backend: &B) -> Result<(), Error> {
        let contact_number = self
            .view
            .field_value(field::PREMIUM_CONTACT)
            .unwrap_or_default()
            .trim()
            .to_owned();
        if contact_number.is_empty() {
            self.view.alert(MISSING_CONTACT);
            return Err(Error::new(MISSING_CONTACT));
        }

        let request = PremiumRequest {
            request_description: self
                .view
                .field_value(field::PREMIUM_REQUEST)
                .unwrap_or_default()
                .trim()
                .to_owned(),
            contact_number,
        };
        match backend.submit_premium(&request).await {
            Ok(()) => {
                tracing::info!("premium request filed");
                self.view.show_premium_confirmation();
                self.view.reset();
                Ok(())
            }
            Err(err) => {
                tracing::error!("fail to file the premium request: {err}");
                self.view.alert(REQUEST_FAILED);
                Err(err.wrap(REQUEST_FAILED))
            }
        }
    }
}
