//! Landing page and HTML form routes.
//!
//! `GET /` renders the marketing page with an empty intake form.
//! `POST /submit` takes the urlencoded form, runs one submission attempt,
//! and renders the page again from the resulting form state: values are
//! kept after a rejection or failure and cleared after a success.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Datelike;

use leadform_core::form::{FormMessage, FormState};
use leadform_core::submission::{FormField, FormFields};

use crate::error::AppError;
use crate::state::AppState;

/// Build the landing page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing_page))
        .route("/submit", post(submit_form))
}

async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state, &FormState::default()))
}

async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<FormFields>,
) -> Response {
    let mut form = state.new_form();
    for field in FormField::ALL {
        form.update_field(field, fields.get(field));
    }

    let status = match form.submit().await {
        Ok(_) => StatusCode::OK,
        Err(e) => AppError::from(e).status().0,
    };

    (status, Html(render_page(&state, form.state()))).into_response()
}

// ── Rendering ────────────────────────────────────────────────────────

/// Escape text for use inside HTML element content and quoted attributes.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page for the given form state.
pub fn render_page(state: &AppState, form: &FormState) -> String {
    let site = escape(&state.site.name);
    let mut html = String::with_capacity(16384);
    html.push_str(&PAGE_HEAD.replace("{{SITE}}", &site));
    html.push_str(&PAGE_INTRO.replace("{{SITE}}", &site));
    render_form(&mut html, form);
    render_footer(&mut html, state, &site);
    html
}

fn render_form(html: &mut String, form: &FormState) {
    let fields = form.fields();
    html.push_str(
        r#"<section id="submit-form" class="form-section"><div class="container"><div class="form-container">
<h2 class="section-title">Have a Project in Mind?</h2>
<p class="section-subtitle">Fill out the form below, and let's make it happen.</p>
<form method="post" action="/submit#submit-form" class="form" onsubmit="this.querySelector('button').disabled=true">
<div class="form-grid">
"#,
    );

    for (field, label, kind, placeholder) in INPUTS {
        let _ = write!(
            html,
            r#"<div class="form-group"><label for="{name}" class="form-label">{label}</label><input type="{kind}" id="{name}" name="{name}" value="{value}" class="form-input" placeholder="{placeholder}"/></div>
"#,
            name = field.name(),
            value = escape(fields.get(field)),
        );
    }

    let _ = write!(
        html,
        r#"</div>
<div class="form-group"><label for="projectDescription" class="form-label">Project Description</label><textarea id="projectDescription" name="projectDescription" rows="6" class="form-textarea" placeholder="Describe your project in detail. What should it do? What features are important?">{}</textarea></div>
"#,
        escape(&fields.project_description),
    );

    match form.message() {
        Some(FormMessage::Error(msg)) => {
            let _ = writeln!(html, r#"<p class="form-error">{}</p>"#, escape(msg));
        }
        Some(FormMessage::Success) => html.push_str(
            "<div class=\"form-success\" role=\"alert\"><strong>Success!</strong> Your project has been submitted. We'll be in touch soon!</div>\n",
        ),
        Some(FormMessage::Failure(msg)) => {
            let _ = writeln!(
                html,
                r#"<div class="form-submission-error" role="alert"><strong>Oops!</strong> {}</div>"#,
                escape(msg)
            );
        }
        None => {}
    }

    let disabled = if form.is_submitting() { " disabled" } else { "" };
    let _ = write!(
        html,
        r#"<button type="submit" class="submit-button"{disabled}>Submit Project</button>
</form></div></div></section>
</main>
"#
    );
}

fn render_footer(html: &mut String, state: &AppState, site: &str) {
    let year = state.clock.now().year();
    let _ = write!(
        html,
        r#"<footer class="footer"><div class="container">
<p>&copy; {year} {site}. All Rights Reserved.</p>
<p class="footer-tagline">Your Vision, Our Code.</p>
"#
    );
    if let Some(email) = &state.site.contact_email {
        let _ = writeln!(
            html,
            r#"<div class="footer-contact"><a href="mailto:{0}">Email Us</a></div>"#,
            escape(email)
        );
    }
    html.push_str("</div></footer>\n</body></html>\n");
}

/// Single-line inputs: field, label, input type, placeholder.
const INPUTS: [(FormField, &str, &str, &str); 3] = [
    (FormField::ClientName, "Your Name", "text", "e.g., Jane Doe"),
    (FormField::ContactEmail, "Contact Email", "email", "you@example.com"),
    (
        FormField::ProjectName,
        "Project Name / Title",
        "text",
        "e.g., Automated Social Media Poster",
    ),
];

/// Document head and styles.
const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>{{SITE}} &mdash; Your Vision, Automated</title>
<style>
*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,'Helvetica Neue',sans-serif;-webkit-font-smoothing:antialiased;background:#f9fafb;color:#1f2937}
.container{width:100%;max-width:1280px;margin:0 auto;padding:0 1.5rem}
.header{background:#fff;box-shadow:0 1px 2px rgba(0,0,0,.05);position:sticky;top:0;z-index:50}
.header-content{display:flex;justify-content:space-between;align-items:center;padding:1rem 1.5rem}
.header-title{font-size:1.5rem;font-weight:700;color:#4f46e5;margin:0}
.header-button,.hero-button{background:#4f46e5;color:#fff;font-weight:700;border-radius:.5rem;text-decoration:none;transition:background-color .3s;white-space:nowrap}
.header-button{padding:.5rem 1rem}.hero-button{padding:.75rem 1.5rem;display:inline-block}
.header-button:hover,.hero-button:hover{background:#4338ca}
.hero-section,.features-section,.how-it-works-section,.form-section{padding:clamp(3rem,5vw,5rem) 0}
.hero-section,.how-it-works-section{background:#fff}
.hero-section{text-align:center}
.hero-title{font-size:clamp(2.5rem,7vw,4rem);font-weight:800;line-height:1.2;margin:0 0 1rem}
.hero-subtitle{max-width:60ch;margin:0 auto 2rem;color:#4b5563;line-height:1.6}
.section-header{text-align:center;margin:0 auto 3rem;max-width:65ch}
.section-title{font-size:clamp(2rem,4vw,2.5rem);font-weight:700;margin:0}
.section-subtitle{font-size:clamp(1rem,2vw,1.125rem);color:#4b5563;margin-top:.5rem;line-height:1.6}
.features-grid{display:grid;grid-template-columns:1fr;gap:2rem}
.feature-card{display:flex;flex-direction:column;align-items:center;text-align:center;padding:1.5rem;background:#fff;border-radius:1rem;box-shadow:0 4px 6px -1px rgba(0,0,0,.1);transition:transform .2s ease}
.feature-card:hover{transform:translateY(-5px)}
.feature-icon{background:#e0e7ff;color:#4f46e5;border-radius:9999px;width:4rem;height:4rem;display:flex;align-items:center;justify-content:center;margin-bottom:1rem}
.feature-title{font-size:1.25rem;font-weight:700;margin:0 0 .5rem}
.feature-description,.step-description{color:#4b5563}
.steps-container{display:flex;flex-direction:column;gap:3rem;max-width:800px;margin:auto}
.step{display:flex;flex-direction:column;align-items:center;text-align:center}
.step-number{flex-shrink:0;background:#4f46e5;color:#fff;border-radius:9999px;width:3rem;height:3rem;display:flex;align-items:center;justify-content:center;font-weight:700;font-size:1.5rem;margin-bottom:1rem}
.step-title{font-size:1.5rem;font-weight:700;margin:0 0 .5rem}
.form-container{background:#fff;padding:clamp(1.5rem,4vw,3rem);border-radius:1rem;box-shadow:0 20px 25px -5px rgba(0,0,0,.1);max-width:56rem;margin:0 auto}
.form{display:flex;flex-direction:column;gap:1.5rem;margin-top:2rem}
.form-grid{display:grid;grid-template-columns:1fr;gap:1.5rem}
.form-label{display:block;font-size:.875rem;font-weight:500;color:#374151;margin-bottom:.5rem}
.form-input,.form-textarea{width:100%;padding:.75rem 1rem;border:1px solid #d1d5db;border-radius:.5rem;font-size:1rem}
.form-input:focus,.form-textarea:focus{outline:none;border-color:#4f46e5;box-shadow:0 0 0 3px rgba(79,70,229,.3)}
.form-textarea{resize:vertical;min-height:120px}
.form-error{color:#ef4444;font-size:.875rem;margin:0}
.form-success,.form-submission-error{padding:.75rem 1rem;border-radius:.5rem;border:1px solid}
.form-success{background:#dcfce7;border-color:#4ade80;color:#166534}
.form-submission-error{background:#fee2e2;border-color:#f87171;color:#991b1b}
.submit-button{width:100%;background:#4f46e5;color:#fff;font-weight:700;padding:1rem 1.5rem;border:none;border-radius:.5rem;cursor:pointer;font-size:1rem}
.submit-button:hover:not(:disabled){background:#4338ca}
.submit-button:disabled{background:#a5b4fc;cursor:not-allowed}
.footer{background:#1f2937;color:#ecf0f1;padding:2.5rem 1.5rem;text-align:center}
.footer p{margin:5px 0}.footer-tagline{font-style:italic;color:#9ca3af}
.footer-contact a{color:#60a5fa;text-decoration:none}
@media(min-width:768px){.features-grid{grid-template-columns:repeat(2,1fr)}.step{flex-direction:row;align-items:flex-start;text-align:left}.step-number{margin:0 1.5rem 0 0}.form-grid{grid-template-columns:repeat(2,1fr)}}
@media(min-width:1024px){.features-grid{grid-template-columns:repeat(3,1fr)}}
</style></head>
"##;

/// Header, hero, feature cards, and process steps.
const PAGE_INTRO: &str = r##"<body>
<header class="header"><div class="container header-content">
  <h1 class="header-title">{{SITE}}</h1>
  <a href="#submit-form" class="header-button">Get Started</a>
</div></header>
<main>
<section class="hero-section"><div class="container">
  <h2 class="hero-title">Your Vision, Automated. For Free.</h2>
  <p class="hero-subtitle">Have an idea for a web app, an automation script, or a complex project? We bring your ideas to life with expert development, completely free of charge.</p>
  <a href="#submit-form" class="hero-button">Submit Your Project Idea</a>
</div></section>
<section class="features-section"><div class="container">
  <div class="section-header"><h2 class="section-title">What We Build</h2><p class="section-subtitle">From simple scripts to full-fledged applications.</p></div>
  <div class="features-grid">
    <div class="feature-card"><div class="feature-icon"><svg width="32" height="32" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M12 8V4H8"/><rect x="4" y="12" width="16" height="8" rx="2"/><path d="M2 12h2M20 12h2M12 12v4h4"/></svg></div><h3 class="feature-title">AI Automation</h3><p class="feature-description">Integrate cutting-edge AI to automate tasks, analyze data, and power intelligent applications.</p></div>
    <div class="feature-card"><div class="feature-icon"><svg width="32" height="32" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="2" y="3" width="20" height="14" rx="2"/><path d="M8 21h8M12 17v4"/></svg></div><h3 class="feature-title">Custom Websites</h3><p class="feature-description">Beautiful, responsive, and high-performance websites tailored to your specific needs.</p></div>
    <div class="feature-card"><div class="feature-icon"><svg width="32" height="32" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M14.5 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7.5z"/><path d="M14 2v6h6M16 13H8M16 17H8M10 9H8"/></svg></div><h3 class="feature-title">Personalized Tools</h3><p class="feature-description">Need a custom script for data science, notes management, or anything else? We've got you covered.</p></div>
  </div>
</div></section>
<section class="how-it-works-section"><div class="container">
  <div class="section-header"><h2 class="section-title">Simple &amp; Transparent Process</h2><p class="section-subtitle">From idea to delivery in three easy steps.</p></div>
  <div class="steps-container">
    <div class="step"><div class="step-number">1</div><div><h3 class="step-title">Submit Your Idea</h3><p class="step-description">Use the form below to tell us about your project. Provide as much detail as possible so we can fully understand your vision.</p></div></div>
    <div class="step"><div class="step-number">2</div><div><h3 class="step-title">We Get to Work</h3><p class="step-description">Our team will review your request and begin development. We handle all the technical details, so you can sit back and relax.</p></div></div>
    <div class="step"><div class="step-number">3</div><div><h3 class="step-title">Project Delivery</h3><p class="step-description">Once your project is complete, we'll contact you via your provided details for the final handover and communication.</p></div></div>
  </div>
</div></section>
"##;
