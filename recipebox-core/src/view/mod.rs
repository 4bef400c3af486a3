//! Client view-models.
//!
//! Each view owns its state and exposes one transition per user action.
//! Actions take `&mut self`, so a view never has two requests in flight.

mod form;
mod list;

pub use form::{RecipeForm, RecipeFormView};
pub use list::{DeleteToken, EditDraft, LoadState, RecipeListView};
