//! Contact form.

use actix_web::{HttpResponse, http::StatusCode, web};
use tera::Context;

use blog_core::validation::ContactInput;
use blog_core::{DomainError, FieldErrors};
use blog_shared::ContactForm;

use crate::middleware::error::AppResult;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::views::{render_with_status, see_other};

/// GET /contact/
///
/// Shows the one-time "sent" notice when the previous submission raised it.
pub async fn form(state: web::Data<AppState>, session: SessionContext) -> AppResult<HttpResponse> {
    let sent = state.contact.take_acknowledgement(&session)?;
    render_form(
        &state,
        &ContactForm::default(),
        &FieldErrors::new(),
        sent,
        StatusCode::OK,
    )
}

/// POST /contact/
pub async fn submit(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<ContactForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let input = ContactInput::new(&form.name, &form.email, &form.subject, &form.body);

    match state.contact.submit_contact(input, &session).await {
        Ok(_) => Ok(see_other("/contact/")),
        Err(DomainError::Validation(errors)) => render_form(
            &state,
            &form,
            &errors,
            false,
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Err(e) => Err(e.into()),
    }
}

fn render_form(
    state: &AppState,
    form: &ContactForm,
    errors: &FieldErrors,
    sent: bool,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let mut ctx = Context::new();
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    ctx.insert("sent", &sent);
    render_with_status(&state.templates, "contact.html", &ctx, status)
}
