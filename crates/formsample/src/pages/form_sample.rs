// File: src/pages/form_sample.rs
// Purpose: Form comparison page: manual form next to the schema-validated one

use super::layout;
use crate::forms::{ErrorMap, Field, FormValues, GenderCode, ManualForm, ValidatedForm};
use crate::routes::PageRoute;
use maud::{html, Markup};

pub const MANUAL_FORM_ID: &str = "manual-form";
pub const VALIDATED_FORM_ID: &str = "validated-form";

/// Endpoints a rendered form posts to
struct FormActions {
    id: &'static str,
    submit: &'static str,
    change: &'static str,
    reset: &'static str,
}

const MANUAL_ACTIONS: FormActions = FormActions {
    id: MANUAL_FORM_ID,
    submit: "/form/manual",
    change: "/form/manual/change",
    reset: "/form/manual/reset",
};

const VALIDATED_ACTIONS: FormActions = FormActions {
    id: VALIDATED_FORM_ID,
    submit: "/form/validated",
    change: "/form/validated/change",
    reset: "/form/validated/reset",
};

pub fn form_sample_page(manual: &ManualForm, validated: &ValidatedForm<'_>) -> Markup {
    layout(
        Some(PageRoute::FormSample),
        PageRoute::FormSample.title(),
        html! {
            h1 { "FormSample" }
            div {
                h2 { "vanilla" }
                (manual_form(manual))
            }
            div {
                h2 { "Schema-validated" }
                (validated_form(validated))
            }
        },
    )
}

/// The manual form; it never shows errors
pub fn manual_form(form: &ManualForm) -> Markup {
    render_form(&MANUAL_ACTIONS, form.values(), &ErrorMap::new(), html! {})
}

/// The validated form with its current error messages
pub fn validated_form(form: &ValidatedForm<'_>) -> Markup {
    let hidden = html! {
        @if form.submit_attempted() {
            input type="hidden" name="_submitted" value="true";
        }
    };
    render_form(&VALIDATED_ACTIONS, form.values(), form.errors(), hidden)
}

fn render_form(actions: &FormActions, values: &FormValues, errors: &ErrorMap, hidden: Markup) -> Markup {
    let id = |name: &str| format!("{}-{}", actions.id, name);
    let zipcode = values.zipcode.as_deref().unwrap_or("");
    let gender = values.gender.as_deref();

    html! {
        form id=(actions.id) method="post" action=(actions.submit)
            hx-post=(actions.submit) hx-target="this" hx-swap="outerHTML" {
            (hidden)

            label for=(id("username")) { "Username" }
            input id=(id("username")) type="text" name="username" value=(values.username)
                hx-post=(actions.change) hx-trigger="change";
            (error_line(errors, Field::Username))

            label for=(id("zipcode")) { "Postal code" }
            input id=(id("zipcode")) type="text" name="zipcode" value=(zipcode)
                hx-post=(actions.change) hx-trigger="change";
            (error_line(errors, Field::Zipcode))

            label for=(id("gender")) { "Gender" }
            select id=(id("gender")) name="gender" hx-post=(actions.change) hx-trigger="change" {
                option value="" selected[gender.is_none()] { "Select gender…" }
                @for code in GenderCode::ALL {
                    option value=(code.code()) selected[gender == Some(code.code())] { (code.label()) }
                }
            }
            (error_line(errors, Field::Gender))

            label {
                input type="checkbox" name="isAgreed" checked[values.is_agreed]
                    hx-post=(actions.change) hx-trigger="change";
                " I agree to the terms"
            }
            (error_line(errors, Field::IsAgreed))

            div class="buttons" {
                button type="reset" hx-post=(actions.reset) { "Reset" }
                button type="submit" { "Submit" }
            }
        }
    }
}

fn error_line(errors: &ErrorMap, field: Field) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class="error" data-field=(field.name()) { (message) }
        }
    }
}
