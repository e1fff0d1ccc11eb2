//! End-to-end index scenarios through the public API.

use ai_maturity::config::{IndexWeights, NormalizationConfig, ScoresConfig};
use ai_maturity::io::{read_index_rows, read_indicator_records, write_index_rows};
use ai_maturity::{
    build_index, CountryRow, CountryTable, IndexSettings, IndicatorRecord, QualitativeScores,
    ScoreSource,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn rec(iso: &str, year: i32, value: f64) -> IndicatorRecord {
    IndicatorRecord::new(iso, iso, year, Some(value))
}

fn scores(rows: &[(&str, f64)]) -> ScoreSource {
    let mut table = CountryTable::new("qualitative_scores");
    for (iso, use_cases) in rows {
        table.push(
            *iso,
            QualitativeScores {
                ai_use_cases_score: *use_cases,
                regulation_score: 3.0,
                governance_frameworks_score: 3.0,
                talent_availability_score: 3.0,
            },
        );
    }
    ScoreSource::Table(table)
}

fn codes(rows: &[CountryRow]) -> Vec<&str> {
    rows.iter().map(|r| r.country_iso.as_str()).collect()
}

#[test]
fn most_recent_year_merge_and_normalization() {
    let gdp = vec![
        rec("USA", 2020, 65_000.0),
        rec("USA", 2019, 60_000.0),
        rec("DEU", 2021, 50_000.0),
    ];
    let internet = vec![rec("USA", 2020, 90.0), rec("DEU", 2021, 95.0)];

    let output = build_index(
        &internet,
        &gdp,
        scores(&[("USA", 4.0), ("DEU", 3.0)]),
        &IndexSettings::default(),
    );

    assert_eq!(codes(&output.rows), vec!["USA", "DEU"]);
    let usa = &output.rows[0];
    let deu = &output.rows[1];
    assert_eq!(usa.gdp_per_capita, 65_000.0);
    assert_eq!(usa.internet_users_pct, 90.0);
    assert_eq!(usa.gdp_per_capita_normalized, 1.0);
    assert_eq!(deu.gdp_per_capita_normalized, 0.0);
    assert!(usa.ai_maturity_index > deu.ai_maturity_index);

    assert_eq!(output.report.gdp_per_capita.input_records, 3);
    assert_eq!(output.report.gdp_per_capita.countries, 2);
    assert_eq!(output.report.dropped_countries(), 0);
}

#[test]
fn country_missing_from_one_series_is_excluded() {
    let gdp = vec![
        rec("USA", 2020, 65_000.0),
        rec("DEU", 2021, 50_000.0),
        rec("FRA", 2021, 45_000.0),
    ];
    let internet = vec![rec("USA", 2020, 90.0), rec("DEU", 2021, 95.0)];

    let output = build_index(
        &internet,
        &gdp,
        ScoreSource::mock(&ScoresConfig::default()),
        &IndexSettings::default(),
    );

    assert!(output.rows.iter().all(|r| r.country_iso != "FRA"));
    assert_eq!(output.rows.len(), 2);
    assert_eq!(output.report.economic_join.dropped_total(), 1);
}

#[test]
fn renormalized_weight_change_flips_adjacent_pair() {
    // A leads on internet usage, B on GDP; B edges ahead on use cases.
    let internet = vec![rec("AAA", 2022, 100.0), rec("BBB", 2022, 40.0)];
    let gdp = vec![rec("AAA", 2022, 10_000.0), rec("BBB", 2022, 80_000.0)];
    let fixture = || scores(&[("AAA", 3.00), ("BBB", 3.01)]);

    let defaults = build_index(&internet, &gdp, fixture(), &IndexSettings::default());
    assert_eq!(codes(&defaults.rows), vec!["BBB", "AAA"]);

    let mut weights = IndexWeights {
        internet_users: 0.25,
        ..IndexWeights::default()
    };
    assert!(weights.validate().is_err());
    weights.normalize();
    assert!(weights.validate().is_ok());

    let settings = IndexSettings {
        weights,
        normalization: NormalizationConfig::default(),
    };
    let shifted = build_index(&internet, &gdp, fixture(), &settings);
    assert_eq!(codes(&shifted.rows), vec!["AAA", "BBB"]);
}

#[test]
fn default_weights_sum_to_one() {
    let weights = IndexWeights::default();
    assert!((weights.sum() - 1.0).abs() < 1e-12);
}

#[test]
fn talent_score_does_not_affect_the_index() {
    let internet = vec![rec("AAA", 2022, 70.0), rec("BBB", 2022, 80.0)];
    let gdp = vec![rec("AAA", 2022, 20_000.0), rec("BBB", 2022, 30_000.0)];
    let with_talent = |talent: f64| {
        let mut table = CountryTable::new("qualitative_scores");
        for iso in ["AAA", "BBB"] {
            table.push(
                iso,
                QualitativeScores {
                    ai_use_cases_score: 3.0,
                    regulation_score: 3.0,
                    governance_frameworks_score: 3.0,
                    talent_availability_score: talent,
                },
            );
        }
        ScoreSource::Table(table)
    };

    let low = build_index(&internet, &gdp, with_talent(2.0), &IndexSettings::default());
    let high = build_index(&internet, &gdp, with_talent(5.0), &IndexSettings::default());
    let indexes = |rows: &[CountryRow]| rows.iter().map(|r| r.ai_maturity_index).collect::<Vec<_>>();
    assert_eq!(indexes(&low.rows), indexes(&high.rows));
}

#[test]
fn raw_files_to_ranked_file() {
    let dir = TempDir::new().unwrap();
    let internet_path = dir.path().join("world_bank_internet_users.csv");
    let gdp_path = dir.path().join("world_bank_gdp_per_capita.csv");
    fs::write(
        &internet_path,
        indoc! {"
            country_name,country_iso,year,value
            United States,USA,2020,90.0
            United States,USA,2021,
            Germany,DEU,2021,95.0
            Japan,JPN,2021,83.0
        "},
    )
    .unwrap();
    fs::write(
        &gdp_path,
        indoc! {"
            country_name,country_iso,year,value
            United States,USA,2020,65000.0
            United States,USA,2019,60000.0
            Germany,DEU,2021,50000.0
            Japan,JPN,2021,40000.0
        "},
    )
    .unwrap();

    let internet = read_indicator_records(&internet_path).unwrap();
    let gdp = read_indicator_records(&gdp_path).unwrap();
    assert_eq!(internet[1].value, None);

    let output = build_index(
        &internet,
        &gdp,
        ScoreSource::mock(&ScoresConfig::default()),
        &IndexSettings::default(),
    );
    assert_eq!(output.report.internet_users.skipped_records, 1);

    let index_path = dir.path().join("processed").join("ai_maturity_index.csv");
    write_index_rows(&index_path, &output.rows).unwrap();

    let text = fs::read_to_string(&index_path).unwrap();
    assert!(text.starts_with(
        "country_iso,internet_users_pct,gdp_per_capita,ai_use_cases_score,regulation_score,\
         governance_frameworks_score,talent_availability_score,internet_users_pct_normalized,\
         gdp_per_capita_normalized,ai_maturity_index\n"
    ));

    let reread = read_index_rows(&index_path).unwrap();
    assert_eq!(reread, output.rows);
    assert!(reread
        .windows(2)
        .all(|w| w[0].ai_maturity_index >= w[1].ai_maturity_index));
}

#[test]
fn same_seed_same_index() {
    let internet = vec![rec("USA", 2020, 90.0), rec("DEU", 2021, 95.0), rec("JPN", 2021, 83.0)];
    let gdp = vec![rec("USA", 2020, 65_000.0), rec("DEU", 2021, 50_000.0), rec("JPN", 2021, 40_000.0)];
    let run = |seed: u64| {
        let config = ScoresConfig {
            seed,
            ..ScoresConfig::default()
        };
        build_index(&internet, &gdp, ScoreSource::mock(&config), &IndexSettings::default()).rows
    };

    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(7));
}
