mod common;

use axum::http::StatusCode;
use common::{parse_body, AuthHeaders, TestApp};
use serde_json::json;

async fn signup_with_email(app: &TestApp, name: &str, email: &str) -> AuthHeaders {
    let response = app.register(name, email, "correct-horse-battery").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    app.login(email, "correct-horse-battery").await
}

#[tokio::test]
async fn test_registration_creates_owned_team() {
    let app = TestApp::new().await;
    let owner = app.signup("Dana Scully").await;

    let team = parse_body(app.request("GET", "/api/team", Some(&owner), None).await).await;
    assert_eq!(team["name"], "Dana Scully's Team");
    assert_eq!(team["owner_id"], owner.user_id.as_str());

    let members = parse_body(app.request("GET", "/api/team/members", Some(&owner), None).await).await;
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "OWNER");
    assert!(members[0].get("password_hash").is_none());

    let renamed = app.request("PUT", "/api/team", Some(&owner), Some(json!({ "name": "Scully Digital" }))).await;
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(parse_body(renamed).await["name"], "Scully Digital");

    let too_short = app.request("PUT", "/api/team", Some(&owner), Some(json!({ "name": "S" }))).await;
    assert_eq!(too_short.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_membership_roles_and_permissions() {
    let app = TestApp::new().await;
    let owner = app.signup("Owner").await;
    let team_id = app.team_id_of(&owner.user_id).await;
    let admin = signup_with_email(&app, "Admin", "admin@team.test").await;
    let member = signup_with_email(&app, "Member", "member@team.test").await;

    let unknown = app.request("POST", "/api/team/members", Some(&owner), Some(json!({ "email": "ghost@team.test" }))).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let owner_role = app.request("POST", "/api/team/members", Some(&owner), Some(json!({ "email": "admin@team.test", "role": "OWNER" }))).await;
    assert_eq!(owner_role.status(), StatusCode::BAD_REQUEST);

    let added = app.request("POST", "/api/team/members", Some(&owner), Some(json!({ "email": "Admin@Team.test", "role": "admin" }))).await;
    assert_eq!(added.status(), StatusCode::CREATED);
    assert_eq!(parse_body(added).await["role"], "ADMIN");

    let duplicate = app.request("POST", "/api/team/members", Some(&owner), Some(json!({ "email": "admin@team.test" }))).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    // The admin works in the owner's team by naming it.
    let added = app.request_for_team(
        "POST", "/api/team/members", Some(&admin), Some(&team_id), Some(json!({ "email": "member@team.test" })),
    ).await;
    assert_eq!(added.status(), StatusCode::CREATED);
    assert_eq!(parse_body(added).await["role"], "MEMBER");

    let members = parse_body(app.request("GET", "/api/team/members", Some(&owner), None).await).await;
    assert_eq!(members.as_array().unwrap().len(), 3);

    // Plain members can read but not manage.
    let listed = app.request_for_team("GET", "/api/team/members", Some(&member), Some(&team_id), None).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let rename = app.request_for_team("PUT", "/api/team", Some(&member), Some(&team_id), Some(json!({ "name": "Hijacked" }))).await;
    assert_eq!(rename.status(), StatusCode::FORBIDDEN);
    let remove_admin = app.request_for_team(
        "DELETE", &format!("/api/team/members/{}", admin.user_id), Some(&member), Some(&team_id), None,
    ).await;
    assert_eq!(remove_admin.status(), StatusCode::FORBIDDEN);

    // Only the owner changes roles.
    let promote = app.request_for_team(
        "PUT", &format!("/api/team/members/{}", member.user_id), Some(&admin), Some(&team_id), Some(json!({ "role": "ADMIN" })),
    ).await;
    assert_eq!(promote.status(), StatusCode::FORBIDDEN);
    let promote = app.request(
        "PUT", &format!("/api/team/members/{}", member.user_id), Some(&owner), Some(json!({ "role": "ADMIN" })),
    ).await;
    assert_eq!(promote.status(), StatusCode::OK);
    assert_eq!(parse_body(promote).await["role"], "ADMIN");

    let self_demote = app.request(
        "PUT", &format!("/api/team/members/{}", owner.user_id), Some(&owner), Some(json!({ "role": "MEMBER" })),
    ).await;
    assert_eq!(self_demote.status(), StatusCode::BAD_REQUEST);

    let remove_owner = app.request_for_team(
        "DELETE", &format!("/api/team/members/{}", owner.user_id), Some(&admin), Some(&team_id), None,
    ).await;
    assert_eq!(remove_owner.status(), StatusCode::FORBIDDEN);

    let removed = app.request("DELETE", &format!("/api/team/members/{}", member.user_id), Some(&owner), None).await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    let again = app.request("DELETE", &format!("/api/team/members/{}", member.user_id), Some(&owner), None).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    // Once removed, the owner's team is out of reach.
    let locked_out = app.request_for_team("GET", "/api/team", Some(&member), Some(&team_id), None).await;
    assert_eq!(locked_out.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_members_share_team_data() {
    let app = TestApp::new().await;
    let owner = app.signup("Shared Owner").await;
    let team_id = app.team_id_of(&owner.user_id).await;
    let colleague = signup_with_email(&app, "Colleague", "colleague@team.test").await;

    app.request("POST", "/api/team/members", Some(&owner), Some(json!({ "email": "colleague@team.test" }))).await;
    app.create_client(&owner, json!({ "name": "Shared Client" })).await;

    let own_team = parse_body(app.request("GET", "/api/clients", Some(&colleague), None).await).await;
    assert!(own_team.as_array().unwrap().is_empty());

    let shared = parse_body(app.request_for_team("GET", "/api/clients", Some(&colleague), Some(&team_id), None).await).await;
    assert_eq!(shared.as_array().unwrap().len(), 1);
    assert_eq!(shared[0]["name"], "Shared Client");
}
