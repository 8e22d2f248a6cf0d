mod common;

use ateneo::config::cors::CorsConfig;
use ateneo::config::jwt::JwtConfig;
use ateneo::router::init_router;
use ateneo::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_course, create_test_enrollment, create_test_professor, create_test_student,
    create_test_user,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

async fn get_auth_token(app: axum::Router, username: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn setup_admin(pool: &PgPool) -> String {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "admin", "adminpass123", "admin").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    get_auth_token(app, "admin", "adminpass123").await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_student_as_admin(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/students/S1/courses/C1")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["student_id"], "S1");
    assert_eq!(body["course_id"], "C1");
    // A fresh enrollment has no result yet
    assert!(body["result"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_duplicate_conflict(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/students/S1/courses/C1")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_student_not_found(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_course(&mut tx, "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/students/S404/courses/C1")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_course_not_found(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/students/S1/courses/C404")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_as_professor_forbidden(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    create_test_professor(&mut tx, "P1").await;
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", Some("P1")).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/students/S1/courses/C1")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_result_as_admin(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/students/S1/courses/C1/results")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&json!({"result": 28})).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["student_id"], "S1");
    assert_eq!(body["course_id"], "C1");
    assert_eq!(body["result"], 28);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_result_overwrites_previous(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", Some(30)).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/students/S1/courses/C1/results")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&json!({"result": 25})).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["result"], 25);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_result_not_enrolled(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/students/S1/courses/C1/results")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&json!({"result": 28})).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_result_out_of_range(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", None).await;
    tx.commit().await.unwrap();

    for bad_result in [31, -1, 100] {
        let app = setup_test_app(pool.clone()).await;

        let request = Request::builder()
            .method("PATCH")
            .uri("/students/S1/courses/C1/results")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(
                serde_json::to_string(&json!({"result": bad_result})).unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "result {bad_result} must be rejected"
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_result_boundary_values(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", None).await;
    tx.commit().await.unwrap();

    for boundary in [0, 30] {
        let app = setup_test_app(pool.clone()).await;

        let request = Request::builder()
            .method("PATCH")
            .uri("/students/S1/courses/C1/results")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(
                serde_json::to_string(&json!({"result": boundary})).unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "result {boundary} is valid");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_professor_grades_own_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    create_test_professor(&mut tx, "P1").await;
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", Some("P1")).await;
    create_test_enrollment(&mut tx, "S1", "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/students/S1/courses/C1/results")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&json!({"result": 30})).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["result"], 30);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_professor_cannot_grade_other_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    create_test_professor(&mut tx, "P1").await;
    create_test_professor(&mut tx, "P2").await;
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C2", Some("P2")).await;
    create_test_enrollment(&mut tx, "S1", "C2", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/students/S1/courses/C2/results")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&json!({"result": 18})).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_professor_cannot_grade_unenrolled_student(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    create_test_professor(&mut tx, "P1").await;
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", Some("P1")).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/students/S1/courses/C1/results")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&json!({"result": 18})).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    // Without the enrollment there is nothing the professor owns
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_reads_own_results(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "S1", "studentpass1", "student").await;
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_course(&mut tx, "C2", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", Some(27)).await;
    create_test_enrollment(&mut tx, "S1", "C2", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "S1", "studentpass1").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/S1/courses/results")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let results = body.as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["course_id"], "C1");
    assert_eq!(results[0]["result"], 27);
    assert!(results[0]["name"].as_str().is_some());
    // Pending results come back as null, not omitted
    assert_eq!(results[1]["course_id"], "C2");
    assert!(results[1]["result"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_read_other_results(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "S1", "studentpass1", "student").await;
    create_test_student(&mut tx, "S1").await;
    create_test_student(&mut tx, "S2").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "S1", "studentpass1").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/S2/courses/results")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_professor_reads_any_student_results(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    create_test_professor(&mut tx, "P1").await;
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", Some(22)).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/S1/courses/results")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_results_student_not_found(pool: PgPool) {
    let token = setup_admin(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/S404/courses/results")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_statistics_ranks_by_average(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_student(&mut tx, "S2").await;
    create_test_student(&mut tx, "S3").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_course(&mut tx, "C2", None).await;
    // S1 averages 29.0, S2 averages 22.5, S3 has no graded enrollment
    create_test_enrollment(&mut tx, "S1", "C1", Some(30)).await;
    create_test_enrollment(&mut tx, "S1", "C2", Some(28)).await;
    create_test_enrollment(&mut tx, "S2", "C1", Some(20)).await;
    create_test_enrollment(&mut tx, "S2", "C2", Some(25)).await;
    create_test_enrollment(&mut tx, "S3", "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/statistics")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Ungraded students are not ranked
    assert_eq!(body["meta"]["total"], 2);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["rank"], 1);
    assert_eq!(data[0]["student_id"], "S1");
    assert_eq!(data[0]["average_result"], 29.0);
    assert_eq!(data[1]["rank"], 2);
    assert_eq!(data[1]["student_id"], "S2");
    assert_eq!(data[1]["average_result"], 22.5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_statistics_pagination(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_student(&mut tx, "S2").await;
    create_test_student(&mut tx, "S3").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", Some(30)).await;
    create_test_enrollment(&mut tx, "S2", "C1", Some(25)).await;
    create_test_enrollment(&mut tx, "S3", "C1", Some(20)).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/statistics?limit=1&offset=1")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Ranks are computed over the whole population, then the page is cut
    assert_eq!(body["meta"]["total"], 3);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["rank"], 2);
    assert_eq!(data[0]["student_id"], "S2");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_statistics_ties_share_rank(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_student(&mut tx, "S2").await;
    create_test_student(&mut tx, "S3").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", Some(30)).await;
    create_test_enrollment(&mut tx, "S2", "C1", Some(30)).await;
    create_test_enrollment(&mut tx, "S3", "C1", Some(20)).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/statistics")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let data = body["data"].as_array().unwrap();

    assert_eq!(data[0]["rank"], 1);
    assert_eq!(data[1]["rank"], 1);
    assert_eq!(data[2]["rank"], 3);
    // Ties break deterministically by student ID
    assert_eq!(data[0]["student_id"], "S1");
    assert_eq!(data[1]["student_id"], "S2");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_statistics_as_student_forbidden(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "S1", "studentpass1", "student").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "S1", "studentpass1").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/statistics")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_statistics_as_professor_allowed(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/students/statistics")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_ranking_with_ties(pool: PgPool) {
    let token = setup_admin(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    create_test_student(&mut tx, "S1").await;
    create_test_student(&mut tx, "S2").await;
    create_test_student(&mut tx, "S3").await;
    create_test_student(&mut tx, "S4").await;
    create_test_course(&mut tx, "C1", None).await;
    create_test_enrollment(&mut tx, "S1", "C1", Some(30)).await;
    create_test_enrollment(&mut tx, "S2", "C1", Some(30)).await;
    create_test_enrollment(&mut tx, "S3", "C1", Some(20)).await;
    // Ungraded enrollments stay out of the ranking
    create_test_enrollment(&mut tx, "S4", "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/courses/C1/rank")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let ranking = body.as_array().unwrap();

    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0]["rank"], 1);
    assert_eq!(ranking[0]["student_id"], "S1");
    assert_eq!(ranking[0]["result"], 30);
    assert_eq!(ranking[1]["rank"], 1);
    assert_eq!(ranking[1]["student_id"], "S2");
    assert_eq!(ranking[2]["rank"], 3);
    assert_eq!(ranking[2]["student_id"], "S3");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_ranking_professor_owns_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    create_test_professor(&mut tx, "P1").await;
    create_test_student(&mut tx, "S1").await;
    create_test_course(&mut tx, "C1", Some("P1")).await;
    create_test_enrollment(&mut tx, "S1", "C1", Some(24)).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/courses/C1/rank")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let ranking = body.as_array().unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0]["student_id"], "S1");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_ranking_professor_not_own_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "P1", "profpass1234", "professor").await;
    create_test_professor(&mut tx, "P1").await;
    create_test_professor(&mut tx, "P2").await;
    create_test_course(&mut tx, "C2", Some("P2")).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "P1", "profpass1234").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/courses/C2/rank")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_ranking_as_student_forbidden(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, "S1", "studentpass1", "student").await;
    create_test_course(&mut tx, "C1", None).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, "S1", "studentpass1").await;

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/courses/C1/rank")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_ranking_course_not_found(pool: PgPool) {
    let token = setup_admin(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/courses/C404/rank")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
