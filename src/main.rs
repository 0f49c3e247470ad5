// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Inkpanel - Main Entry Point
//!
//! A rich-text editor panel for writing articles with a title, preface,
//! styled blocks, links and embedded media. Built with Rust and egui.

mod app;
mod config;
mod document;
mod editor;
mod error;
mod export;
mod files;
mod string_utils;
mod theme;
mod ui;

use app::InkpanelApp;
use config::load_config;
use log::info;
use ui::get_app_icon;

/// Application name constant.
const APP_NAME: &str = "Inkpanel";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let settings = load_config();
    let window_size = settings.window_size;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([480.0, 360.0])
        .with_maximized(window_size.maximized);

    if let Some(icon) = get_app_icon() {
        viewport = viewport.with_icon(icon);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(InkpanelApp::new(cc, settings)))),
    )
}
