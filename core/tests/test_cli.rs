use std::fs;

use strive_core::cli::render_body_report;
use strive_core::{App, AppConfig, MuscleGroup, NewEntry, RemoteStatus, Tier};

#[test]
fn app_bootstrap_logs_workout_and_renders() {
    let dir = std::env::temp_dir().join(format!("strive_app_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let cfg = AppConfig {
        data_dir: dir.clone(),
        api_base_url: None,
        ..AppConfig::default()
    };

    {
        let mut app = App::bootstrap(&cfg).expect("bootstrap");
        app.recorder
            .add_entry(NewEntry::new(MuscleGroup::Back, "Deadlift", 10, 10, 160.0))
            .unwrap();
        let (outcome, state) = app.log_workout().expect("log_workout");
        assert_eq!(outcome.remote, RemoteStatus::NotConfigured);
        assert_eq!(state.get(MuscleGroup::Back), 16_000.0);
    }

    // ny oppstart leser inn det samme
    let app = App::bootstrap(&cfg).expect("bootstrap");
    let back = app
        .body
        .levels()
        .into_iter()
        .find(|l| l.group == MuscleGroup::Back)
        .unwrap();
    assert_eq!(back.level, Tier::Gold);
    assert_eq!(app.recorder.history().len(), 1);

    let report = render_body_report(app.body.state());
    assert!(report.contains("Gold"));
    assert!(report.contains("Total Weight Lifted: 16000 kg"));

    fs::remove_dir_all(&dir).ok();
}
