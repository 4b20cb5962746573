use std::sync::Arc;

use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pedidobot::infra::{InMemoryCatalog, InMemoryOrders, RetryingAssistant, ScriptedAssistant};
use pedidobot::{ChatEngine, ChatTurn, MenuItem, OrderError};

// ============================================================================
// Demo Binary - A Scripted Lanchonete Conversation
// ============================================================================
// Drives the engine through a full order: build, edit, remove, pay, confirm.
// The assistant replies are scripted so the run is deterministic; swap in a
// real AssistantClient to talk to an actual model.

fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("pastel", "Pastel", Decimal::new(850, 2), 40),
        MenuItem::new("x-burger", "X-Burger", Decimal::new(1800, 2), 25),
        MenuItem::new(
            "suco-de-laranja",
            "Suco de Laranja",
            Decimal::new(900, 2),
            30,
        ),
        MenuItem::new("coca-lata", "Coca-Cola Lata", Decimal::new(650, 2), 50),
        MenuItem::new("acai", "Açaí", Decimal::new(2200, 2), 10),
    ]
}

fn scripted_replies() -> Vec<&'static str> {
    vec![
        "Claro! Pedido atualizado:\n- Pastel (2 unidades)\n- Suco de Laranja (1 unidade)\n\nMais alguma coisa?",
        "[editarItem] Alterado Pastel para 3 unidades [removerItem] Removi o Suco de Laranja. Algo mais?",
        "Perfeito, pagamento via PIX! Seu pedido está confirmado. Obrigado!",
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pedidobot=debug")),
        )
        .init();

    tracing::info!("🚀 Starting PedidoBot conversation demo");

    let assistant = Arc::new(RetryingAssistant::with_defaults(Arc::new(
        ScriptedAssistant::new(scripted_replies()),
    )));
    let engine = ChatEngine::new(
        Arc::new(InMemoryCatalog::new(menu())),
        Arc::new(InMemoryOrders::new()),
        assistant,
    );

    let user_id = "cliente-demo";
    let user_messages = [
        "Olá! Quero fazer um pedido: 2 pastel e 1 suco de laranja",
        "Muda o pastel pra 3 e tira o suco, por favor",
        "Só isso. Vou pagar no pix",
    ];

    let mut turns: Vec<ChatTurn> = Vec::new();
    let mut last_outcome = None;

    for message in user_messages {
        tracing::info!(user = user_id, "💬 {}", message);
        turns.push(ChatTurn::user(message));

        match engine.handle_turn(user_id, &turns).await {
            Ok(outcome) => {
                tracing::info!("🤖 {}", outcome.reply);
                for error in &outcome.errors {
                    tracing::warn!(user = user_id, "⚠️  {}", error.user_message());
                }
                tracing::info!(
                    order_id = %outcome.order.id,
                    lines = outcome.order.lines.len(),
                    total = %outcome.order.total,
                    confirmed = outcome.confirmed,
                    "turn applied"
                );
                turns.push(ChatTurn::assistant(&outcome.reply));
                last_outcome = Some(outcome);
            }
            Err(err @ OrderError::AiService(_)) => {
                tracing::error!(user = user_id, error = %err, "assistant unavailable");
                tracing::info!("🤖 {}", err.user_message());
            }
            Err(err) => {
                tracing::warn!(user = user_id, error = %err, "turn rejected");
                tracing::info!("🤖 {}", err.user_message());
            }
        }
    }

    if let Some(outcome) = last_outcome {
        tracing::info!("📦 Final turn outcome:");
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    tracing::info!("🎉 Demo complete!");

    Ok(())
}
