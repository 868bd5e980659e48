use std::path::Path;

use stemdeck::domain::{
    BpmResult, JobId, JobWorkspace, STEM_URL_PREFIX, SourceStem, StemName, StemSet,
};

#[test]
fn given_two_job_ids_when_generated_then_are_unique() {
    let id1 = JobId::new();
    let id2 = JobId::new();
    assert_ne!(id1, id2);
}

#[test]
fn given_job_id_when_displayed_then_is_hyphenated_uuid() {
    let shown = JobId::new().to_string();

    let parsed = uuid::Uuid::parse_str(&shown).unwrap();
    assert_eq!(parsed.hyphenated().to_string(), shown);
    assert_eq!(parsed.get_version_num(), 4);
}

#[test]
fn given_stem_names_when_listed_then_has_the_five_output_stems() {
    let names: Vec<&str> = StemName::ALL.iter().map(StemName::as_str).collect();
    assert_eq!(names, ["kick", "drums", "bass", "vocals", "other"]);
}

#[test]
fn given_source_stem_when_naming_file_then_uses_mp3_extension() {
    assert_eq!(SourceStem::Guitar.file_name(), "guitar.mp3");
    assert_eq!(StemName::Kick.file_name(), "kick.mp3");
}

#[test]
fn given_melodic_stems_when_listed_then_order_is_guitar_piano_other() {
    assert_eq!(
        SourceStem::MELODIC,
        [SourceStem::Guitar, SourceStem::Piano, SourceStem::Other]
    );
}

#[test]
fn given_required_stems_when_listed_then_excludes_optional_instruments() {
    assert!(!SourceStem::REQUIRED.contains(&SourceStem::Guitar));
    assert!(!SourceStem::REQUIRED.contains(&SourceStem::Piano));
    assert_eq!(SourceStem::REQUIRED.len(), 4);
}

#[test]
fn given_stem_set_when_building_urls_then_all_share_job_id() {
    let job_id = JobId::new();
    let stems = StemSet::new(job_id, Path::new("/srv/output").join(job_id.to_string()));

    for stem in StemName::ALL {
        assert_eq!(
            stems.url(stem),
            format!("{}/{}/{}.mp3", STEM_URL_PREFIX, job_id, stem)
        );
    }
    assert_eq!(
        stems.url(StemName::Vocals),
        format!("/server/output/{}/vocals.mp3", job_id)
    );
}

#[test]
fn given_job_workspace_when_laying_out_then_everything_lives_in_job_dir() {
    let job_id = JobId::new();
    let dir = Path::new("/srv/output").join(job_id.to_string());
    let workspace = JobWorkspace::new(job_id, &dir);

    assert_eq!(workspace.input_path(), dir.join("input_audio"));
    assert_eq!(workspace.separation_dir(), dir.join("demucs_out"));
    assert_eq!(workspace.stem_path(StemName::Other), dir.join("other.mp3"));
    assert_eq!(
        workspace.intermediates(),
        [dir.join("demucs_out"), dir.join("input_audio")]
    );
}

#[test]
fn given_tempo_and_ticks_when_building_result_then_rounds_and_takes_first_tick() {
    let result = BpmResult::from_rhythm(140.0, &[0.4, 0.8, 1.2, 1.6]);

    assert_eq!(result.bpm, 140);
    assert_eq!(result.beat_offset, 0.4);
}

#[test]
fn given_no_ticks_when_building_result_then_offset_is_zero() {
    let result = BpmResult::from_rhythm(120.0, &[]);

    assert_eq!(result.bpm, 120);
    assert_eq!(result.beat_offset, 0.0);
}

#[test]
fn given_half_tempo_when_building_result_then_rounds_half_away_from_zero() {
    assert_eq!(BpmResult::from_rhythm(99.5, &[]).bpm, 100);
    assert_eq!(BpmResult::from_rhythm(99.49, &[]).bpm, 99);
}

#[test]
fn given_non_finite_or_negative_tempo_when_building_result_then_bpm_is_zero() {
    assert_eq!(BpmResult::from_rhythm(f64::NAN, &[]).bpm, 0);
    assert_eq!(BpmResult::from_rhythm(f64::INFINITY, &[]).bpm, 0);
    assert_eq!(BpmResult::from_rhythm(-12.0, &[]).bpm, 0);
}

#[test]
fn given_fallback_when_built_then_offset_is_zero() {
    let result = BpmResult::fallback(0);
    assert_eq!(result, BpmResult { bpm: 0, beat_offset: 0.0 });
}
