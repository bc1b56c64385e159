/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
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

mod report;

use crate::report::TopicReport;
use clap::Parser;
use mf_router::{ClientRegistry, TopicSubscriptionRegistry};
use static_topology::{StaticTopology, TopologyError};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(about = "Resolves topic destinations and subscriber counts of a static topology")]
struct InspectorArgs {
    #[arg(short, long, value_name = "FILE")]
    topology: String,
    /// Topic to resolve; repeatable.
    #[arg(long = "topic", value_name = "TOPIC", required = true)]
    topics: Vec<String>,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn inspect(args: &InspectorArgs) -> Result<Vec<TopicReport>, TopologyError> {
    let topology = StaticTopology::from_file(&args.topology)?;
    let mut clients = ClientRegistry::new();
    let mut subscriptions = TopicSubscriptionRegistry::new();
    topology.apply(&mut clients, &mut subscriptions)?;

    info!(
        "loaded {} clients and {} subscriptions from {}",
        clients.len(),
        subscriptions.len(),
        args.topology
    );

    Ok(args
        .topics
        .iter()
        .map(|topic| TopicReport::inspect(topic, &clients, &mut subscriptions))
        .collect())
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args = InspectorArgs::parse();
    let reports = match inspect(&args) {
        Ok(reports) => reports,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("Unable to serialize report: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            print!("{report}");
        }
    }
    ExitCode::SUCCESS
}
