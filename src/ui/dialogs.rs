use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("Instructions"),
        Some(
            "Tap the numbers from 1 to 25 in ascending order.\n\
The grid reshuffles after every correct tap.\n\
The stopwatch starts on 1 and stops on 25 — beat your best pace.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("TapDash")
        .application_icon("io.tapdash.TapDash")
        .developer_name("TapDash contributors")
        .developers(vec!["TapDash contributors"])
        .version("1.0.0")
        .comments("A reaction game of tapping 1 to 25 against the clock.")
        .build();
    dialog.present(app.active_window().as_ref());
    dialog
}
