//! Interactive terminal front-end.
//!
//! Line-oriented shell hosting the two faces of the client. Rendering is
//! deliberately plain; the interesting behavior (cart rules, reconciliation,
//! the screen state machine) lives in the view modules and is only driven
//! from here.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::OrdersApi;
use crate::composer::{OrderComposer, SubmitError};
use crate::dashboard::{OrderDashboard, StatusFilter};
use crate::menu::MenuCatalog;
use crate::notice::{Notice, NoticeKind};
use crate::order::{Order, OrderStatus};
use crate::push::{PushChannel, EVENT_NEW_ORDER, EVENT_ORDER_UPDATED};
use crate::tracking::{step_reached, OrderTracking, TrackingState, STATUS_STEPS};

// ---------------------------------------------------------------------------
// Customer flow state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Composing,
    Success,
    Tracking,
}

/// Screens of the customer flow and the only transitions between them.
/// There is no editing-an-existing-order state.
#[derive(Debug)]
pub struct CustomerFlow {
    screen: Screen,
}

impl Default for CustomerFlow {
    fn default() -> Self {
        Self {
            screen: Screen::Composing,
        }
    }
}

impl CustomerFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Composing -> Success, on a successful submission.
    pub fn submit_succeeded(&mut self) -> bool {
        self.transition(Screen::Composing, Screen::Success)
    }

    /// Success -> Composing, by explicit user action.
    pub fn place_another(&mut self) -> bool {
        self.transition(Screen::Success, Screen::Composing)
    }

    /// Composing or Success -> Tracking, by explicit "track" action.
    pub fn track(&mut self) -> bool {
        if matches!(self.screen, Screen::Composing | Screen::Success) {
            self.screen = Screen::Tracking;
            return true;
        }
        false
    }

    /// Tracking -> Composing. This is the retry-by-navigation path; nothing
    /// in the tracking view refetches on its own.
    pub fn back_to_composing(&mut self) -> bool {
        self.transition(Screen::Tracking, Screen::Composing)
    }

    fn transition(&mut self, from: Screen, to: Screen) -> bool {
        if self.screen == from {
            self.screen = to;
            return true;
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Shared rendering helpers
// ---------------------------------------------------------------------------

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        let prefix = match notice.kind {
            NoticeKind::Success => "[ok]",
            NoticeKind::Info => "[info]",
            NoticeKind::Alert => "[!]",
        };
        println!("{prefix} {}", notice.message);
    }
}

fn alert(message: &str) {
    println!("[!] {message}");
}

fn connection_banner(connected: bool) -> &'static str {
    if connected {
        "Connected - Real-time updates active"
    } else {
        "Disconnected - no live updates"
    }
}

fn print_order_items(order: &Order) {
    for item in &order.items {
        println!(
            "    {}x {:<24} ${:>6.2}",
            item.quantity,
            item.name,
            item.line_total()
        );
    }
}

// ---------------------------------------------------------------------------
// Customer mode
// ---------------------------------------------------------------------------

pub async fn run_customer(api: &OrdersApi, channel: &Arc<PushChannel>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut flow = CustomerFlow::new();
    let mut composer = OrderComposer::new();
    let mut last_customer: Option<String> = None;

    println!("orderdesk - place an order");
    render_composer(&composer);

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match flow.screen() {
            Screen::Composing => {
                if handle_composing(
                    input,
                    api,
                    &mut composer,
                    &mut flow,
                    &mut last_customer,
                )
                .await
                {
                    break;
                }
                match flow.screen() {
                    Screen::Composing => render_composer(&composer),
                    Screen::Success => render_success(),
                    Screen::Tracking => {
                        if run_tracking(api, channel, &mut flow, &mut last_customer, &mut lines)
                            .await?
                        {
                            break;
                        }
                        render_composer(&composer);
                    }
                }
            }
            Screen::Success => match input {
                "another" => {
                    flow.place_another();
                    render_composer(&composer);
                }
                "track" => {
                    flow.track();
                    if run_tracking(api, channel, &mut flow, &mut last_customer, &mut lines)
                        .await?
                    {
                        break;
                    }
                    render_composer(&composer);
                }
                "quit" => break,
                _ => render_success(),
            },
            Screen::Tracking => {
                // Unreachable: run_tracking owns the loop while on this screen.
                flow.back_to_composing();
            }
        }
    }
    Ok(())
}

/// Returns true when the user asked to quit.
async fn handle_composing(
    input: &str,
    api: &OrdersApi,
    composer: &mut OrderComposer,
    flow: &mut CustomerFlow,
    last_customer: &mut Option<String>,
) -> bool {
    let (command, rest) = split_command(input);
    match command {
        "name" => composer.set_customer_name(rest),
        "email" => composer.set_customer_email(rest),
        "add" => match rest.parse::<u32>().ok().and_then(MenuCatalog::find) {
            Some(item) => composer.add_item(item),
            None => alert("Unknown menu item"),
        },
        "qty" => {
            let mut parts = rest.split_whitespace();
            match (parts.next().and_then(|id| id.parse::<u32>().ok()), parts.next()) {
                (Some(id), Some(raw)) => composer.set_quantity(id, raw),
                _ => alert("Usage: qty <item-id> <quantity>"),
            }
        }
        "rm" => match rest.parse::<u32>() {
            Ok(id) => composer.remove_item(id),
            Err(_) => alert("Usage: rm <item-id>"),
        },
        "submit" => {
            let name = composer.customer_name().trim().to_string();
            match composer.submit(api).await {
                Ok(order) => {
                    *last_customer = Some(name);
                    tracing::info!("order {} placed", order.id);
                    flow.submit_succeeded();
                }
                Err(SubmitError::Validation(message)) => alert(message),
                Err(SubmitError::AlreadySubmitting) => {}
                Err(SubmitError::Api(_)) => alert("Failed to place order. Please try again."),
            }
        }
        "track" => {
            if composer.customer_name().trim().is_empty() && last_customer.is_none() {
                alert("Set your name first so we know whose orders to track");
            } else {
                if !composer.customer_name().trim().is_empty() {
                    *last_customer = Some(composer.customer_name().trim().to_string());
                }
                flow.track();
            }
        }
        "quit" => return true,
        "" => {}
        _ => alert("Commands: name <n> | email <e> | add <id> | qty <id> <n> | rm <id> | submit | track | quit"),
    }
    false
}

/// Returns true when the user asked to quit the whole program.
async fn run_tracking(
    api: &OrdersApi,
    channel: &Arc<PushChannel>,
    flow: &mut CustomerFlow,
    last_customer: &mut Option<String>,
    lines: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
) -> std::io::Result<bool> {
    let Some(customer_name) = last_customer.clone() else {
        flow.back_to_composing();
        return Ok(false);
    };

    let mut view = OrderTracking::new(customer_name.clone());
    let _ = view.load(api).await;
    let tracking = Arc::new(Mutex::new(view));

    if let Err(error) = channel.join_order_room(&customer_name).await {
        tracing::warn!("could not join order room: {error}");
    }
    let handler_view = tracking.clone();
    channel.on(EVENT_ORDER_UPDATED, move |order| {
        if let Ok(mut view) = handler_view.lock() {
            view.apply_updated(order);
            print_notices(view.take_notices());
        }
    });

    let mut quit = false;
    render_tracking(&tracking, channel.is_connected());
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "back" => break,
            "quit" => {
                quit = true;
                break;
            }
            _ => render_tracking(&tracking, channel.is_connected()),
        }
    }
    channel.off(EVENT_ORDER_UPDATED);
    flow.back_to_composing();
    Ok(quit)
}

fn render_composer(composer: &OrderComposer) {
    println!();
    println!("== Menu ==");
    for item in MenuCatalog::all_items() {
        println!("  {}. {:<24} ${:>6.2}", item.id, item.name, item.price);
    }
    if composer.entries().is_empty() {
        println!("\nYour cart is empty.");
    } else {
        println!("\n== Your Order ==");
        for entry in composer.entries() {
            println!(
                "  {}x {:<24} ${:>6.2}",
                entry.quantity,
                entry.item.name,
                entry.line_total()
            );
        }
        println!("  Total: ${:.2}", composer.total());
    }
    let name = composer.customer_name();
    println!(
        "\nName: {}",
        if name.is_empty() { "(not set)" } else { name }
    );
    println!("> name <n> | add <id> | qty <id> <n> | rm <id> | submit | track | quit");
}

fn render_success() {
    println!();
    println!("== Order Placed Successfully! ==");
    println!("Thank you for your order. We will start preparing it right away.");
    println!("> another | track | quit");
}

fn render_tracking(tracking: &Arc<Mutex<OrderTracking>>, connected: bool) {
    let Ok(view) = tracking.lock() else {
        return;
    };
    println!();
    println!("== Your Orders ({}) ==", connection_banner(connected));
    match view.state() {
        TrackingState::Loading => println!("Loading your orders..."),
        TrackingState::Error(message) => {
            println!("{message}");
            println!("(type 'back' to return)");
        }
        TrackingState::Empty => {
            println!("No orders found for {}", view.customer_name());
            println!("Place an order to track its status here!");
        }
        TrackingState::Ready => {
            for order in view.orders() {
                println!(
                    "Order #{}  {}  ${:.2}",
                    order.short_id(),
                    order.created_at_display(),
                    order.total_amount
                );
                let marks: Vec<String> = STATUS_STEPS
                    .iter()
                    .enumerate()
                    .map(|(index, step)| {
                        let mark = if step_reached(order.status, index) {
                            "x"
                        } else {
                            " "
                        };
                        format!("[{mark}] {}", step.label)
                    })
                    .collect();
                println!("  {}", marks.join(" -> "));
                print_order_items(order);
                println!("  {}", STATUS_STEPS[order.status.step_index()].message);
            }
        }
    }
    println!("> back | quit (any other key refreshes)");
}

// ---------------------------------------------------------------------------
// Admin mode
// ---------------------------------------------------------------------------

pub async fn run_admin(api: &OrdersApi, channel: &Arc<PushChannel>) -> std::io::Result<()> {
    // The dashboard still renders when the snapshot fetch fails; it just
    // starts empty, exactly like a fresh install.
    let initial = match api.list_orders(None).await {
        Ok(orders) => orders,
        Err(error) => {
            tracing::error!("failed to fetch initial orders: {error}");
            Vec::new()
        }
    };
    let dashboard = Arc::new(Mutex::new(OrderDashboard::new(initial)));

    if let Err(error) = channel.join_admin().await {
        tracing::warn!("could not join admin room: {error}");
    }

    let created_view = dashboard.clone();
    channel.on(EVENT_NEW_ORDER, move |order| {
        if let Ok(mut view) = created_view.lock() {
            view.apply_created(order);
            print_notices(view.take_notices());
        }
    });
    let updated_view = dashboard.clone();
    channel.on(EVENT_ORDER_UPDATED, move |order| {
        if let Ok(mut view) = updated_view.lock() {
            view.apply_updated(order);
            print_notices(view.take_notices());
        }
    });

    println!("orderdesk - admin dashboard");
    render_dashboard(&dashboard, channel.is_connected());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let (command, rest) = split_command(input);
        match command {
            "filter" => {
                let filter = match rest {
                    "all" | "" => Some(StatusFilter::All),
                    value => value.parse::<OrderStatus>().ok().map(StatusFilter::Only),
                };
                match filter {
                    Some(filter) => {
                        if let Ok(mut view) = dashboard.lock() {
                            view.set_filter(filter);
                        }
                    }
                    None => alert("Usage: filter <all|placed|confirmed|preparing|completed>"),
                }
            }
            "status" => {
                let mut parts = rest.split_whitespace();
                let target = parts.next().map(str::to_string);
                let status = parts.next().and_then(|s| s.parse::<OrderStatus>().ok());
                match (target, status) {
                    (Some(id), Some(status)) => {
                        // No optimistic update: the confirming push event is
                        // the only thing that changes what the admin sees.
                        if let Err(error) = api.update_status(&id, status).await {
                            tracing::error!("status update failed for {id}: {error}");
                            if let Ok(mut view) = dashboard.lock() {
                                view.report_update_failure();
                                print_notices(view.take_notices());
                            }
                        }
                    }
                    _ => alert("Usage: status <order-id> <placed|confirmed|preparing|completed>"),
                }
            }
            "quit" => break,
            _ => {}
        }
        render_dashboard(&dashboard, channel.is_connected());
    }

    channel.off(EVENT_NEW_ORDER);
    channel.off(EVENT_ORDER_UPDATED);
    Ok(())
}

fn render_dashboard(dashboard: &Arc<Mutex<OrderDashboard>>, connected: bool) {
    let Ok(view) = dashboard.lock() else {
        return;
    };
    println!();
    println!("== Admin Dashboard ({}) ==", connection_banner(connected));
    let stats = view.stats();
    println!(
        "Total {}  |  placed {}  confirmed {}  preparing {}  completed {}",
        stats.total, stats.placed, stats.confirmed, stats.preparing, stats.completed
    );
    println!("Filter: {}", view.filter().label());

    let visible = view.filtered();
    if visible.is_empty() {
        println!("No orders found");
    }
    for order in visible {
        println!(
            "#{}  {:<20} {:<10} ${:>7.2}  {}",
            order.short_id(),
            order.customer_name,
            order.status,
            order.total_amount,
            order.created_at_display()
        );
        if let Some(email) = &order.customer_email {
            println!("    {email}");
        }
        print_order_items(order);
    }
    println!("> filter <f> | status <id> <s> | quit (any other key refreshes)");
}

fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_follows_only_the_defined_transitions() {
        let mut flow = CustomerFlow::new();
        assert_eq!(flow.screen(), Screen::Composing);

        // composing -> success -> composing
        assert!(flow.submit_succeeded());
        assert_eq!(flow.screen(), Screen::Success);
        assert!(!flow.submit_succeeded());
        assert!(flow.place_another());
        assert_eq!(flow.screen(), Screen::Composing);

        // composing -> tracking is an explicit action, independent of submit
        assert!(flow.track());
        assert_eq!(flow.screen(), Screen::Tracking);
        assert!(!flow.track());
        assert!(!flow.submit_succeeded());

        // navigation back out of tracking
        assert!(flow.back_to_composing());
        assert_eq!(flow.screen(), Screen::Composing);
    }

    #[test]
    fn success_can_move_to_tracking() {
        let mut flow = CustomerFlow::new();
        flow.submit_succeeded();
        assert!(flow.track());
        assert_eq!(flow.screen(), Screen::Tracking);
    }

    #[test]
    fn split_command_separates_verb_and_rest() {
        assert_eq!(split_command("qty 3 2"), ("qty", "3 2"));
        assert_eq!(split_command("submit"), ("submit", ""));
        assert_eq!(split_command(""), ("", ""));
    }
}
