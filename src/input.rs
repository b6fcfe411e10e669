use bevy::prelude::*;

use crate::settings::VoyageSettings;
use crate::sim::{ResetEvent, ToggleRunEvent};

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (start_pause_trigger, reset_trigger, help_toggle, diagnostics_toggle),
        );
    }
}

fn start_pause_trigger(mut ev_toggle: EventWriter<ToggleRunEvent>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::Space) {
        ev_toggle.send(ToggleRunEvent);
    }
}

fn reset_trigger(mut ev_reset: EventWriter<ResetEvent>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyR) {
        ev_reset.send(ResetEvent);
    }
}

fn help_toggle(mut settings: ResMut<VoyageSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyH) {
        settings.show_help = !settings.show_help;
        debug!("help panel: {}", settings.show_help);
    }
}

fn diagnostics_toggle(mut settings: ResMut<VoyageSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        settings.show_diagnostics = !settings.show_diagnostics;
        debug!("diagnostics panel: {}", settings.show_diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RunState, SimPlugin};
    use bevy::state::app::StatesPlugin;

    fn app_with_keys() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins((SimPlugin, InputPlugin));
        app.update();
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(key);
        keys.clear();
        keys.press(key);
        app.update();
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(key);
        keys.clear();
    }

    #[test]
    fn space_starts_on_following_frame() {
        let mut app = app_with_keys();
        press(&mut app, KeyCode::Space);
        // The toggle request is read at the start of the next frame.
        app.update();
        let state = *app.world().resource::<State<RunState>>().get();
        assert_eq!(state, RunState::Running);
    }

    #[test]
    fn panel_toggles() {
        let mut app = app_with_keys();
        assert!(app.world().resource::<VoyageSettings>().show_help);
        press(&mut app, KeyCode::KeyH);
        assert!(!app.world().resource::<VoyageSettings>().show_help);
        press(&mut app, KeyCode::F3);
        assert!(app.world().resource::<VoyageSettings>().show_diagnostics);
    }
}
