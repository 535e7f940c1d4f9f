// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Builds a small tree from inline YAML: a greeter published and injected
//! under a second name, plus a named component with its own configuration.
//!
//! Run with `RUST_LOG=debug` to see every lifecycle step.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use the_assembly::config::ComponentRegistry;
use the_assembly::engine::{Engine, Instance};
use the_assembly::errors::ComposeError;
use the_assembly::observability::init_tracing;
use the_assembly::traits::Component;
use the_assembly::value::{Function, Value};

const CONFIG: &str = r#"
__define: app
modules:
  - __locator: greeter
    __define: english
    __basename:
      hello: greet
  - __inject: english
    __basename: greeter
components:
  formal:
    __locator: greeter
    greeting: Good evening
    targets: [Ada, Grace]
"#;

#[derive(Deserialize)]
struct GreeterConfig {
    greeting: String,
    targets: Vec<String>,
}

/// Renders one greeting line per target and exposes them through `greet`.
struct Greeter;

#[async_trait]
impl Component for Greeter {
    fn name(&self) -> &'static str {
        "greeter"
    }

    fn defaults(&self) -> Option<Value> {
        Some(Value::from(json!({"greeting": "Hello", "targets": ["world"]})))
    }

    async fn initialize(&self, instance: &Instance) -> Result<(), ComposeError> {
        let config: GreeterConfig = instance.config()?;
        let lines = config
            .targets
            .iter()
            .map(|target| Value::from(format!("{}, {}!", config.greeting, target)))
            .collect();

        instance.define("lines", Value::Array(lines))?;
        instance.define(
            "greet",
            Value::Function(Function::new(|receiver, _| {
                Ok(receiver.and_then(|r| r.get("lines")).unwrap_or_default())
            })),
        )?;
        Ok(())
    }
}

fn render(value: &Value) -> anyhow::Result<String> {
    let json = value.to_json().unwrap_or(serde_json::Value::Null);
    Ok(serde_json::to_string(&json)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let registry = ComponentRegistry::new().with("greeter", Arc::new(Greeter))?;
    let engine = Engine::builder().resolver(registry).build();

    let config: serde_yaml::Value = serde_yaml::from_str(CONFIG)?;
    let app = engine.load(Value::from(config)).await?;

    println!("published: {:?}", engine.scope().names());
    println!("app.hello() -> {}", render(&app.call("hello", &[])?)?);

    let greeter = app
        .get("greeter")
        .and_then(|v| v.as_component().cloned())
        .ok_or_else(|| anyhow::anyhow!("greeter was not mounted"))?;
    println!("app.greeter is english: {}", engine.scope().get("english")?.ptr_eq(&greeter));

    if let Some(Value::Component(formal)) = app.get("formal") {
        println!("app.formal.greet() -> {}", render(&formal.call("greet", &[])?)?);
    }

    Ok(())
}
