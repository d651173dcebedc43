use crate::state::AppState;
use axum::{extract::State, response::Html};

/// Demo page showing the Go fonts through the mounted stylesheet
pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config.assets.mount))
}

pub fn render_index(mount: &str) -> String {
    let prefix = mount.trim_end_matches('/');
    format!(
        r#"<!doctype html><title>Go fonts</title>
<link rel=stylesheet href={prefix}/go.css>
<style>:root{{font-family:Go}}code{{font-family:"Go Mono"}}</style>
<p>You should see this text in Go font.
<ul><li><i>Italic</i>
<li><b>Bold</b>
<li><span style="font-family:'Go Medium'">Medium</span>
<li><span style="font-family:'Go Smallcaps'">Smallcaps</span></ul>
<p>Some code too: <code>if err != nil {{...}}</code>.
"#
    )
}
