//! Template view models.
//!
//! Everything here is derived from a [`UiSnapshot`]; templates never see
//! core types directly. Prices are preformatted strings.

use fabu_core::{
    CartItem, Catalog, CheckoutSnapshot, Effect, ModalKind, ModalPhase, Product, ScrollEffect,
    Totals, UiSnapshot, View,
};
use serde_json::{Map, Value, json};

use crate::content::Page;

/// Meta description for views without their own.
pub const DEFAULT_DESCRIPTION: &str = "Avant-garde apparel, thoughtfully made.";

/// Product display data.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
    pub description: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
            description: product.description.clone(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
        }
    }
}

/// One cart or order line.
#[derive(Debug, Clone)]
pub struct LineView {
    pub product: ProductView,
    pub quantity: u32,
    pub line_total: String,
    /// Quantity the "-" button submits. Reaching 0 removes the line.
    pub decrement_to: i64,
    pub increment_to: i64,
}

impl From<&CartItem> for LineView {
    fn from(item: &CartItem) -> Self {
        let quantity = i64::from(item.quantity);
        Self {
            product: ProductView::from(&item.product),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
            decrement_to: quantity - 1,
            increment_to: quantity + 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub grand_total: String,
}

impl From<&Totals> for TotalsView {
    fn from(totals: &Totals) -> Self {
        Self {
            subtotal: totals.subtotal.to_string(),
            shipping: totals.shipping.to_string(),
            tax: totals.tax.to_string(),
            grand_total: totals.grand_total.to_string(),
        }
    }
}

/// Where a modal is in its lifecycle, as the markup needs it.
#[derive(Debug, Clone, Copy)]
pub struct ModalFrame {
    pub kind: ModalKind,
    pub phase: ModalPhase,
}

impl ModalFrame {
    #[must_use]
    pub const fn new(kind: ModalKind, phase: ModalPhase) -> Self {
        Self { kind, phase }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Rendered at all: open, or playing its exit transition.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    /// State class for the modal root element.
    #[must_use]
    pub fn state_class(&self) -> &'static str {
        match self.phase {
            ModalPhase::Open => "is-open",
            ModalPhase::ClosingGrace => "is-closing",
            ModalPhase::Closed => "is-closed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReceiptModalView {
    pub frame: ModalFrame,
    pub product: Option<ProductView>,
}

#[derive(Debug, Clone)]
pub struct CartModalView {
    pub frame: ModalFrame,
    pub lines: Vec<LineView>,
    pub totals: TotalsView,
    pub item_count: u64,
}

impl CartModalView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A placed order, as shown on the checkout receipt.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order_number: String,
    pub placed_at: String,
    pub lines: Vec<LineView>,
    pub totals: TotalsView,
}

impl From<&CheckoutSnapshot> for OrderView {
    fn from(snapshot: &CheckoutSnapshot) -> Self {
        Self {
            order_number: snapshot.order_number.to_string(),
            placed_at: snapshot.placed_at_display(),
            lines: snapshot.items().iter().map(LineView::from).collect(),
            totals: TotalsView::from(&snapshot.totals()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutModalView {
    pub frame: ModalFrame,
    pub order: Option<OrderView>,
}

/// Everything inside `#modal-layer`.
#[derive(Debug, Clone)]
pub struct ModalLayerView {
    pub receipt: ReceiptModalView,
    pub cart: CartModalView,
    pub checkout: CheckoutModalView,
    pub scroll_locked: bool,
    /// When some modal is in its grace period, re-fetch the layer after
    /// this many milliseconds so the cleared state shows up.
    pub refresh_after_ms: Option<u64>,
}

impl ModalLayerView {
    #[must_use]
    pub fn new(snapshot: &UiSnapshot, grace_ms: u64) -> Self {
        let receipt = ReceiptModalView {
            frame: ModalFrame::new(ModalKind::Receipt, snapshot.receipt.phase),
            product: snapshot.receipt.payload.as_ref().map(ProductView::from),
        };
        let cart = CartModalView {
            frame: ModalFrame::new(ModalKind::Cart, snapshot.cart_drawer.phase),
            lines: snapshot.cart_items.iter().map(LineView::from).collect(),
            totals: TotalsView::from(&snapshot.cart_totals),
            item_count: snapshot.item_count,
        };
        let checkout = CheckoutModalView {
            frame: ModalFrame::new(ModalKind::Checkout, snapshot.checkout.phase),
            order: snapshot.checkout.payload.as_ref().map(OrderView::from),
        };

        let closing = [receipt.frame, cart.frame, checkout.frame]
            .iter()
            .any(|frame| frame.phase == ModalPhase::ClosingGrace);

        Self {
            receipt,
            cart,
            checkout,
            scroll_locked: snapshot.scroll_locked,
            refresh_after_ms: closing.then_some(grace_ms),
        }
    }
}

/// Rendered page copy for the "Our Story" view.
#[derive(Debug, Clone)]
pub struct StoryView {
    pub title: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub content_html: String,
    pub cta_label: Option<String>,
    pub cta_href: String,
}

impl From<&Page> for StoryView {
    fn from(page: &Page) -> Self {
        Self {
            title: page.meta.title.clone(),
            tagline: page.meta.tagline.clone(),
            description: page.meta.description.clone(),
            content_html: page.content_html.clone(),
            cta_label: page.meta.cta_label.clone(),
            cta_href: page.meta.cta_href.clone().unwrap_or_else(|| "#shop".to_string()),
        }
    }
}

/// The main content region.
#[derive(Debug, Clone)]
pub struct MainView {
    pub view: View,
    pub featured: Vec<ProductView>,
    pub collection: Vec<ProductView>,
    pub story: Option<StoryView>,
}

impl MainView {
    #[must_use]
    pub fn new(view: View, catalog: &Catalog, story: Option<&Page>) -> Self {
        Self {
            view,
            featured: catalog.featured().iter().map(ProductView::from).collect(),
            collection: catalog.products().iter().map(ProductView::from).collect(),
            story: story.map(StoryView::from),
        }
    }

    #[must_use]
    pub fn is_our_story(&self) -> bool {
        self.view == View::OurStory
    }

    /// Meta description for the page, from the story page when it is shown.
    #[must_use]
    pub fn meta_description(&self) -> &str {
        self.story
            .as_ref()
            .filter(|_| self.is_our_story())
            .and_then(|story| story.description.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTION)
    }
}

/// Client-side events for an `HX-Trigger-After-Swap` header.
///
/// The page script listens for `scroll-lock`, `scroll-unlock`, `scroll-top`
/// and `scroll-anchor` (with `{"id": ...}`). Returns `None` when there is
/// nothing for the page to do.
#[must_use]
pub fn client_events(effects: &[Effect]) -> Option<String> {
    let mut events = Map::new();
    for effect in effects {
        match effect {
            Effect::ScrollLock(true) => {
                events.insert("scroll-lock".to_string(), Value::Null);
            }
            Effect::ScrollLock(false) => {
                events.insert("scroll-unlock".to_string(), Value::Null);
            }
            Effect::Scroll(ScrollEffect::Top) => {
                events.insert("scroll-top".to_string(), Value::Null);
            }
            Effect::Scroll(ScrollEffect::Anchor(id)) => {
                events.insert("scroll-anchor".to_string(), json!({ "id": id }));
            }
            Effect::ScheduleGraceClear { .. } | Effect::CancelGraceClear(_) => {}
        }
    }

    if events.is_empty() {
        None
    } else {
        Some(Value::Object(events).to_string())
    }
}
