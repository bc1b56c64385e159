/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod support;

use futures::StreamExt;
use mf_router::{MessageBroker, RouterError, TopicMessage};
use serde_json::json;
use support::{client, init_logging, RecordingTransport};

#[tokio::test(flavor = "multi_thread")]
async fn publish_delivers_each_destination_with_its_params() {
    init_logging();
    let transport = RecordingTransport::new();
    let broker = MessageBroker::new("publish-test", transport.clone());
    broker.connect_client(client("client#1", "app-1")).await;
    broker.connect_client(client("client#2", "app-2")).await;

    broker
        .subscribe("myhome/livingroom/temperature", "client#1", "sub#1")
        .await
        .unwrap();
    broker
        .subscribe("myhome/:room/temperature", "client#2", "sub#2")
        .await
        .unwrap();
    broker
        .subscribe("myhome/:room/:measurement", "client#1", "sub#3")
        .await
        .unwrap();
    broker
        .subscribe("myhome/kitchen/temperature", "client#2", "sub#4")
        .await
        .unwrap();

    let report = broker
        .publish(
            TopicMessage::new("myhome/livingroom/temperature", json!({"celcius": 22}))
                .with_header("publisher", "app-3"),
        )
        .await
        .unwrap();

    assert_eq!(report.delivered, 3);
    let deliveries = transport.deliveries();
    let routed: Vec<(&str, String)> = deliveries
        .iter()
        .map(|delivery| {
            (
                delivery.client_id.as_str(),
                mf_router::observability::fields::format_params(&delivery.message.params),
            )
        })
        .collect();
    assert_eq!(
        routed,
        vec![
            ("client#1", "none".to_string()),
            ("client#2", "room=livingroom".to_string()),
            ("client#1", "room=livingroom,measurement=temperature".to_string()),
        ]
    );
    assert!(deliveries.iter().all(|delivery| {
        delivery.message.body == json!({"celcius": 22})
            && delivery.message.headers.get("publisher").map(String::as_str) == Some("app-3")
    }));
}

#[tokio::test(flavor = "multi_thread")]
async fn retained_message_is_replayed_to_late_subscribers() {
    init_logging();
    let transport = RecordingTransport::new();
    let broker = MessageBroker::new("retained-test", transport.clone());
    broker.connect_client(client("client#1", "app-1")).await;

    let report = broker
        .publish(TopicMessage::new("myhome/kitchen/temperature", json!(19)).retained())
        .await
        .unwrap();
    assert_eq!(report.delivered, 0);
    assert_eq!(broker.retained_message_count().await, 1);

    broker
        .subscribe("myhome/:room/temperature", "client#1", "sub#1")
        .await
        .unwrap();

    let deliveries = transport.take_deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].client_id, "client#1");
    assert_eq!(deliveries[0].message.body, json!(19));
    assert_eq!(deliveries[0].message.params.get("room"), Some("kitchen"));
}

#[tokio::test(flavor = "multi_thread")]
async fn retained_message_reaches_concurrent_subscriber_exactly_once() {
    init_logging();
    for round in 0..64 {
        let transport = RecordingTransport::new();
        let broker = MessageBroker::new("retained-race-test", transport.clone());
        broker.connect_client(client("client#1", "app-1")).await;

        let (published, subscribed) = tokio::join!(
            broker.publish(TopicMessage::new("myhome/kitchen/temperature", json!(round)).retained()),
            broker.subscribe("myhome/:room/temperature", "client#1", "sub#1"),
        );
        published.unwrap();
        subscribed.unwrap();

        let deliveries = transport.take_deliveries();
        assert_eq!(deliveries.len(), 1, "round {round}");
        assert_eq!(deliveries[0].message.body, json!(round));
        assert_eq!(deliveries[0].message.params.get("room"), Some("kitchen"));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn retained_message_without_body_deletes_and_is_not_routed() {
    init_logging();
    let transport = RecordingTransport::new();
    let broker = MessageBroker::new("retained-delete-test", transport.clone());
    broker.connect_client(client("client#1", "app-1")).await;
    broker
        .publish(TopicMessage::new("myhome/kitchen/temperature", json!(19)).retained())
        .await
        .unwrap();
    broker
        .subscribe("myhome/kitchen/temperature", "client#1", "sub#1")
        .await
        .unwrap();
    transport.take_deliveries();

    let report = broker
        .publish(TopicMessage::new("myhome/kitchen/temperature", json!(null)).retained())
        .await
        .unwrap();

    assert_eq!(report.delivered, 0);
    assert!(transport.deliveries().is_empty());
    assert_eq!(broker.retained_message_count().await, 0);

    broker
        .subscribe("myhome/kitchen/:measurement", "client#1", "sub#2")
        .await
        .unwrap();
    assert!(transport.deliveries().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn disconnect_is_observed_as_single_count_drop() {
    init_logging();
    let transport = RecordingTransport::new();
    let broker = MessageBroker::new("disconnect-test", transport.clone());
    broker.connect_client(client("client#1", "app-1")).await;
    broker.connect_client(client("client#2", "app-1")).await;
    broker.subscribe("a/b", "client#1", "sub#1").await.unwrap();
    broker.subscribe("a/b", "client#2", "sub#2").await.unwrap();
    broker.subscribe("a/b", "client#2", "sub#3").await.unwrap();

    let mut counts = broker.subscription_count("a/b").await.unwrap();
    assert_eq!(counts.next().await, Some(3));

    broker.disconnect_client("client#2").await.unwrap();
    assert_eq!(counts.next().await, Some(1));
    assert_eq!(counts.try_next_count(), None);

    let report = broker.publish(TopicMessage::new("a/b", json!(1))).await.unwrap();
    assert_eq!(report.delivered, 1);
    assert_eq!(transport.deliveries()[0].client_id, "client#1");
}

#[tokio::test(flavor = "multi_thread")]
async fn broker_surfaces_registry_misuse_errors() {
    init_logging();
    let broker = MessageBroker::new("misuse-test", RecordingTransport::new());

    assert!(matches!(
        broker.subscribe("a/b", "client#1", "").await,
        Err(RouterError::TopicSubscribe(_))
    ));
    assert!(matches!(
        broker.unsubscribe("").await,
        Err(RouterError::TopicUnsubscribe(_))
    ));
    assert!(matches!(
        broker.subscription_count("a/:b").await,
        Err(RouterError::TopicObserve(_))
    ));
    assert!(broker.unsubscribe("unknown").await.is_ok());
}
