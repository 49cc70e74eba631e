//! Optimistic board synchronized with a live server.

use savings_client::{Error, ProjectBoard, RecordState};
use savings_core::{ProjectDraft, ProjectPatch, SettingsPatch};

use crate::common::TestServer;

async fn loaded_board(server: &TestServer) -> ProjectBoard {
    let mut board = ProjectBoard::default();
    board.refresh(&server.client).await.unwrap();
    board
}

#[tokio::test]
async fn test_refresh_loads_server_state() {
    let server = TestServer::seeded().await;
    let board = loaded_board(&server).await;

    let ids: Vec<_> = board.visible().map(|r| r.project().id.clone()).collect();
    assert_eq!(ids, vec!["powerbi", "project2"]);
    assert_eq!(board.settings().business_rate, 150.0);

    server.stop().await;
}

#[tokio::test]
async fn test_create_twice_gets_suffixed_id() {
    let server = TestServer::seeded().await;
    let mut board = loaded_board(&server).await;

    let first = board
        .create(&server.client, ProjectDraft::new("My New Project!"))
        .await
        .unwrap();
    let second = board
        .create(&server.client, ProjectDraft::new("My New Project!"))
        .await
        .unwrap();
    assert_eq!(first.project.id, "my-new-project");
    assert_eq!(second.project.id, "my-new-project-1");

    let ids: Vec<_> = server
        .client
        .list_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.project.id)
        .collect();
    assert_eq!(
        ids,
        vec!["powerbi", "project2", "my-new-project", "my-new-project-1"]
    );

    server.stop().await;
}

#[tokio::test]
async fn test_update_settings_reprices_previews() {
    let server = TestServer::seeded().await;
    let mut board = loaded_board(&server).await;

    let settings = board
        .update_settings(
            &server.client,
            &SettingsPatch {
                it_rate: None,
                business_rate: Some(300.0),
            },
        )
        .await
        .unwrap();
    assert_eq!(settings.business_rate, 300.0);
    assert_eq!(board.settings(), settings);
    assert_eq!(board.preview("powerbi").unwrap().business_saving, 9000.0);
    assert_eq!(server.client.settings().await.unwrap(), settings);

    server.stop().await;
}

#[tokio::test]
async fn test_edit_preview_then_save() {
    let server = TestServer::seeded().await;
    let mut board = loaded_board(&server).await;

    board
        .edit(
            "project2",
            &ProjectPatch {
                business_hours_back: Some(20.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(board.preview("project2").unwrap().business_saving, 3000.0);

    let saved = board.save(&server.client, "project2").await.unwrap();
    assert_eq!(saved.derived.business_saving, 3000.0);
    assert_eq!(
        *board.get("project2").unwrap().state(),
        RecordState::Clean
    );

    let fetched = server.client.get_project("project2").await.unwrap();
    assert_eq!(fetched.project.business_hours_back, 20.0);

    server.stop().await;
}

#[tokio::test]
async fn test_delete_removes_from_board_and_server() {
    let server = TestServer::seeded().await;
    let mut board = loaded_board(&server).await;

    board.delete(&server.client, "powerbi").await.unwrap();
    assert!(!board.contains("powerbi"));
    assert!(server.client.get_project("powerbi").await.unwrap_err().is_not_found());

    server.stop().await;
}

#[tokio::test]
async fn test_failed_save_restores_and_resyncs() {
    let server = TestServer::seeded().await;
    let mut board = loaded_board(&server).await;

    server
        .client
        .update_settings(&SettingsPatch {
            it_rate: Some(50.0),
            business_rate: None,
        })
        .await
        .unwrap();

    let offline = savings_client::SavingsClient::new("http://127.0.0.1:1").unwrap();
    board
        .edit(
            "powerbi",
            &ProjectPatch {
                count: Some(1.0),
                ..Default::default()
            },
        )
        .unwrap();
    let err = board.save(&offline, "powerbi").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));

    let record = board.get("powerbi").unwrap();
    assert_eq!(record.project().count, 200.0);
    assert!(matches!(record.state(), RecordState::Error(_)));

    board.refresh(&server.client).await.unwrap();
    assert_eq!(board.settings().it_rate, 50.0);
    assert_eq!(
        *board.get("powerbi").unwrap().state(),
        RecordState::Clean
    );

    server.stop().await;
}
