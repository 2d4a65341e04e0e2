//! The lookup window: a city field, a button, and the latest result.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;

use vane_core::Config;
use vane_weather::{
    compass_point, weather_description, ForecastClient, GeocodingClient, Lookup, LookupRequest,
    LookupService, Origin, TemperatureUnit, WeatherCache,
};

use crate::service::{self, ServiceMessage};

pub struct VaneApp {
    // Owns the runtime the lookups run on; dropped with the window.
    runtime: tokio::runtime::Runtime,
    service: Arc<LookupService>,
    units: TemperatureUnit,
    city: String,
    busy: bool,
    output: Option<String>,
    error: Option<String>,
    tx: Sender<ServiceMessage>,
    rx: Receiver<ServiceMessage>,
}

impl VaneApp {
    pub fn new(config: &Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let service = Arc::new(LookupService::new(
            WeatherCache::new(config.cache_file()),
            GeocodingClient::new_with_base_url(&config.lookup.geocoding_api_url)?,
            ForecastClient::new_with_base_url(&config.lookup.forecast_api_url)?,
            config.lookup.cache_enabled,
            config.lookup.ttl(),
        ));

        let (tx, rx) = channel();

        Ok(Self {
            runtime,
            service,
            units: config.lookup.temperature_unit,
            city: String::new(),
            busy: false,
            output: None,
            error: None,
            tx,
            rx,
        })
    }

    fn submit(&mut self, ctx: &egui::Context) {
        if self.busy {
            return;
        }

        if self.city.trim().is_empty() {
            self.error = Some("Enter a city name".to_string());
            return;
        }

        self.busy = true;
        self.error = None;

        let repaint_ctx = ctx.clone();
        service::request_lookup(
            &self.tx,
            self.runtime.handle(),
            Arc::clone(&self.service),
            LookupRequest::City(self.city.clone()),
            move || repaint_ctx.request_repaint(),
        );
    }

    fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                ServiceMessage::LookupDone(result) => {
                    self.busy = false;
                    match result {
                        Ok(lookup) => {
                            self.output = Some(format_result(&lookup, self.units));
                            self.error = None;
                        }
                        Err(e) => {
                            self.error = Some(e.user_message());
                        }
                    }
                }
            }
        }
    }
}

impl eframe::App for VaneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Current weather");
            ui.add_space(8.0);

            let mut submitted = false;
            ui.horizontal(|ui| {
                ui.label("City:");
                let response = ui.text_edit_singleline(&mut self.city);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
            });

            // Re-entrant submission stays disabled while a lookup runs.
            if ui
                .add_enabled(!self.busy, egui::Button::new("Look up"))
                .clicked()
            {
                submitted = true;
            }

            if submitted {
                self.submit(ctx);
            }

            ui.add_space(8.0);

            if self.busy {
                ui.spinner();
            }

            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::RED, error);
            }

            if let Some(output) = &self.output {
                ui.monospace(output);
            }
        });
    }
}

fn format_result(lookup: &Lookup, units: TemperatureUnit) -> String {
    let record = &lookup.record;
    let origin = match lookup.origin {
        Origin::Cached => "from cache",
        Origin::Live => "live",
    };

    format!(
        "{:.1} {}, {}\nWind {:.1} m/s {}\n({})",
        units.convert(record.temperature_c),
        units.symbol(),
        weather_description(record.weather_code),
        record.wind_speed_ms,
        compass_point(record.wind_direction_deg),
        origin,
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{TimeZone, Utc};
    use vane_weather::WeatherRecord;

    fn lookup(origin: Origin) -> Lookup {
        Lookup {
            record: WeatherRecord {
                temperature_c: -5.0,
                wind_speed_ms: 3.2,
                wind_direction_deg: 315.0,
                weather_code: 71,
                observed_at: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            },
            origin,
        }
    }

    #[test]
    fn test_format_result_live() {
        let text = format_result(&lookup(Origin::Live), TemperatureUnit::Celsius);
        assert!(text.contains("-5.0 °C"));
        assert!(text.contains("Slight snow fall"));
        assert!(text.contains("3.2 m/s NW"));
        assert!(text.contains("(live)"));
    }

    #[test]
    fn test_format_result_cached_fahrenheit() {
        let text = format_result(&lookup(Origin::Cached), TemperatureUnit::Fahrenheit);
        assert!(text.contains("23.0 °F"));
        assert!(text.contains("(from cache)"));
    }
}
