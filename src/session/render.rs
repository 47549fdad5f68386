use std::fmt::Write;

use chrono::NaiveDate;

use super::models::{SessionView, Theme};

const STYLE: &str = "\
body{font-family:sans-serif;margin:0}\
.app{min-height:100vh;padding:2rem;text-align:center}\
.light{background:#f4f6fb;color:#1d2330}\
.dark{background:#1d2330;color:#e8ecf4}\
.error{color:red}\
.weather-card,.forecast-card{display:inline-block;padding:1rem;margin:.5rem;border-radius:8px;background:rgba(127,127,127,.12)}\
.history ul{list-style:none;padding:0}\
form.inline{display:inline}\
.loader{margin:1rem auto;width:32px;height:32px;border:4px solid #ccc;border-top-color:#3b82f6;border-radius:50%}";

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn icon_url(icon_base_url: &str, icon: &str) -> String {
    format!("{}/{}@2x.png", icon_base_url.trim_end_matches('/'), icon)
}

fn display_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a, %b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Render the whole dashboard page for a session view.
pub fn render_dashboard(view: &SessionView, icon_base_url: &str) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Weather Dashboard</title>\
         <style>{STYLE}</style></head><body><div class=\"app {theme}\">\
         <h1>Weather Dashboard</h1>\
         <form class=\"inline\" method=\"post\" action=\"/theme\">\
         <button class=\"theme-toggle\">{toggle}</button></form>",
        theme = view.theme.as_str(),
        toggle = match view.theme {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        },
    );

    let _ = write!(
        html,
        "<form class=\"inline\" method=\"post\" action=\"/search\">\
         <input type=\"text\" name=\"city\" placeholder=\"Enter city\" value=\"{}\" autofocus>\
         <button>Search</button></form>",
        escape_html(&view.query),
    );

    if view.weather.is_some() {
        html.push_str(
            "<form class=\"inline\" method=\"post\" action=\"/refresh\">\
             <button>Refresh</button></form>",
        );
    }

    if view.loading {
        html.push_str("<div class=\"loader\"></div>");
    }

    if let Some(error) = &view.error {
        let _ = write!(html, "<p class=\"error\">{}</p>", escape_html(error));
    }

    if let Some(weather) = &view.weather {
        let _ = write!(
            html,
            "<div class=\"weather-card\"><h2>{city}</h2>\
             <p>Temp: {temp}°C</p><p>Condition: {condition}</p>\
             <p>Humidity: {humidity}%</p><p>Wind: {wind} m/s</p>\
             <img src=\"{icon}\" alt=\"weather icon\"></div>",
            city = escape_html(&weather.city),
            temp = weather.temperature,
            condition = escape_html(&weather.condition),
            humidity = weather.humidity,
            wind = weather.wind_speed,
            icon = escape_html(&icon_url(icon_base_url, &weather.icon)),
        );
    }

    if !view.forecast.is_empty() {
        html.push_str("<div class=\"forecast\"><h3>5-Day Forecast</h3><div class=\"forecast-cards\">");
        for entry in &view.forecast {
            let _ = write!(
                html,
                "<div class=\"forecast-card\"><p>{date}</p>\
                 <img src=\"{icon}\" alt=\"forecast icon\">\
                 <p>{temp}°C</p><p>{condition}</p></div>",
                date = escape_html(&display_date(&entry.date)),
                icon = escape_html(&icon_url(icon_base_url, &entry.icon)),
                temp = entry.temperature,
                condition = escape_html(&entry.condition),
            );
        }
        html.push_str("</div></div>");
    }

    if !view.history.is_empty() {
        html.push_str("<div class=\"history\"><h3>Recent Searches</h3><ul>");
        for city in &view.history {
            let city = escape_html(city);
            let _ = write!(
                html,
                "<li><form method=\"post\" action=\"/history\">\
                 <input type=\"hidden\" name=\"city\" value=\"{city}\">\
                 <button>{city}</button></form></li>",
            );
        }
        html.push_str("</ul></div>");
    }

    html.push_str("</div></body></html>");
    html
}
