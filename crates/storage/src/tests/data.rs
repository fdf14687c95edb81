use std::sync::LazyLock;

use chrono::NaiveDate;
use gymlog_domain as domain;
use serde_json::json;

pub static TOKEN: LazyLock<domain::Token> = LazyLock::new(|| domain::Token::new("token"));

pub static EXERCISE: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: domain::ExerciseID::from(4),
    display_name: "Front Squat".to_string(),
    muscle_group: muscle_group("Quads"),
    major_muscle_group: Some(domain::MajorMuscleGroup::new("LEGS").unwrap()),
    url: Some("https://example.org/front-squat".to_string()),
});

pub static WORKOUT_SESSION: LazyLock<domain::WorkoutSession> =
    LazyLock::new(|| domain::WorkoutSession {
        id: Some(domain::WorkoutID::from(7)),
        user_id: "alice".to_string(),
        session_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        exercises: vec![
            domain::ExerciseLogEntry {
                exercise: domain::ExerciseRef::Id(domain::ExerciseID::from(1)),
                sets: domain::Sets::new(3).unwrap(),
                reps: domain::Reps::new(10).unwrap(),
                weight: Some(kg(60.0)),
            },
            domain::ExerciseLogEntry {
                exercise: domain::ExerciseRef::Id(domain::ExerciseID::from(4)),
                sets: domain::Sets::new(5).unwrap(),
                reps: domain::Reps::new(5).unwrap(),
                weight: None,
            },
        ],
    });

pub static WORKOUT_PLAN: LazyLock<domain::WorkoutPlan> = LazyLock::new(|| domain::WorkoutPlan {
    id: Some(domain::WorkoutPlanID::from(12)),
    user_id: "alice".to_string(),
    name: "Strength".to_string(),
    summary: domain::PlanSummary {
        goal: "Build strength".to_string(),
        workout_type: "Split".to_string(),
        training_level: "Beginner".to_string(),
        program_duration: "8 weeks".to_string(),
        days_per_week: 2,
        time_per_workout: "60 min".to_string(),
        equipments: vec!["Barbell".to_string()],
        target_gender: "Any".to_string(),
        recommended_supplements: vec![],
    },
    schedule: domain::WeekSchedule::from_days(
        Some(domain::ScheduleID::from(3)),
        [
            (
                domain::Weekday::Monday,
                vec![domain::ScheduleItem {
                    muscle_group: vec![muscle_group("Chest")],
                    exercise: vec![domain::ScheduleExercise::Id(domain::ExerciseID::from(1))],
                    sets: Some(domain::Sets::new(3).unwrap()),
                    reps: Some(domain::Reps::new(10).unwrap()),
                    weight: Some(kg(60.0)),
                }],
            ),
            (
                domain::Weekday::Thursday,
                vec![domain::ScheduleItem {
                    muscle_group: vec![muscle_group("Quads")],
                    exercise: vec![domain::ScheduleExercise::Id(domain::ExerciseID::from(4))],
                    sets: None,
                    reps: None,
                    weight: None,
                }],
            ),
        ],
    ),
});

pub static LEGACY_WORKOUT_PLAN: LazyLock<domain::WorkoutPlan> =
    LazyLock::new(|| domain::WorkoutPlan {
        id: Some(domain::WorkoutPlanID::from(13)),
        user_id: "alice".to_string(),
        name: "Old Plan".to_string(),
        summary: domain::PlanSummary {
            days_per_week: 2,
            ..domain::PlanSummary::default()
        },
        schedule: domain::WeekSchedule::from_days(
            None,
            [
                (
                    domain::Weekday::Monday,
                    vec![domain::ScheduleItem {
                        muscle_group: vec![muscle_group("Chest")],
                        exercise: vec![domain::ScheduleExercise::Legacy(vec![
                            "Bench Press".to_string(),
                            "Chest".to_string(),
                        ])],
                        sets: None,
                        reps: None,
                        weight: None,
                    }],
                ),
                (
                    domain::Weekday::Tuesday,
                    vec![domain::ScheduleItem {
                        muscle_group: vec![],
                        exercise: vec![domain::ScheduleExercise::Legacy(vec![
                            "Front Squat".to_string(),
                        ])],
                        sets: None,
                        reps: None,
                        weight: None,
                    }],
                ),
            ],
        ),
    });

pub fn workout_plan_json() -> serde_json::Value {
    json!({
        "workoutplan_id": 12,
        "user_id": "alice",
        "name": "Strength",
        "workoutplan_summary": {
            "goal": "Build strength",
            "workout_type": "Split",
            "training_level": "Beginner",
            "program_duration": "8 weeks",
            "days_per_week": 2,
            "time_per_workout": "60 min",
            "equipments": ["Barbell"],
            "target_gender": "Any",
            "recommended_supplements": []
        },
        "workoutplan_schedule": {
            "id": 3,
            "Monday": [
                {
                    "muscle_group": ["Chest"],
                    "exercise": [1],
                    "sets": 3,
                    "reps": 10,
                    "weight": { "value": 60.0, "unit": "kg" }
                }
            ],
            "Tuesday": [],
            "Wednesday": [],
            "Thursday": [{ "muscle_group": ["Quads"], "exercise": [4] }],
            "Friday": [],
            "Saturday": [],
            "Sunday": []
        }
    })
}

pub fn legacy_workout_plan_json() -> serde_json::Value {
    json!({
        "id": 13,
        "user_id": "alice",
        "name": "Old Plan",
        "workoutplan_summary": { "days_per_week": "2" },
        "workoutplan_schedule": {
            "Monday": [{ "muscle_group": ["Chest"], "exercise": [["Bench Press", "Chest"]] }],
            "Tuesday": [{ "name": "Front Squat" }]
        }
    })
}

pub fn muscle_group(name: &str) -> domain::MuscleGroup {
    domain::MuscleGroup::new(name).unwrap()
}

fn kg(value: f32) -> domain::WeightSpec {
    domain::WeightSpec {
        value: domain::Weight::new(value).unwrap(),
        unit: domain::WeightUnit::Kg,
    }
}
