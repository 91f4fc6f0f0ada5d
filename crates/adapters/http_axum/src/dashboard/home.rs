//! Dashboard home page — every grid with its tiles at their placements.

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use mxgrid_app::ports::{DataSource, LayoutEngine, ViewerLauncher};
use mxgrid_domain::grid::{Grid, PixelRect};
use mxgrid_domain::tile::{ContentBlock, Tile};

use crate::state::AppState;

/// One content block, flattened for the template.
pub struct BlockView {
    pub kind: &'static str,
    pub text: String,
    pub name: String,
    pub value: String,
    pub size: u16,
    pub max_length: u16,
    pub href: String,
}

impl BlockView {
    fn new(kind: &'static str, text: String) -> Self {
        Self {
            kind,
            text,
            name: String::new(),
            value: String::new(),
            size: 0,
            max_length: 0,
            href: String::new(),
        }
    }
}

pub struct TileView {
    pub id: u32,
    pub class: String,
    pub rect: PixelRect,
    pub blocks: Vec<BlockView>,
}

pub struct GridView {
    pub container: String,
    pub built_at: String,
    pub height: u32,
    pub tiles: Vec<TileView>,
}

impl GridView {
    fn from_grid(grid: &Grid) -> Self {
        let tiles = grid
            .tiles
            .iter()
            .map(|tile| {
                let rect = grid
                    .placements
                    .iter()
                    .find(|placement| placement.tile_id == tile.id)
                    .map(|placement| placement.rect)
                    .unwrap_or_default();
                tile_view(grid.container.as_str(), tile, rect)
            })
            .collect();
        Self {
            container: grid.container.to_string(),
            built_at: grid.built_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            height: grid.content_height(),
            tiles,
        }
    }
}

fn tile_view(container: &str, tile: &Tile, rect: PixelRect) -> TileView {
    let blocks = tile
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Text { text } => BlockView::new("text", text.clone()),
            ContentBlock::Command { caption, target } => BlockView {
                href: target.path(),
                ..BlockView::new("command", caption.clone())
            },
            ContentBlock::Checkbox { name, value } => BlockView {
                name: name.clone(),
                value: value.to_string(),
                ..BlockView::new("checkbox", String::new())
            },
            ContentBlock::TextInput {
                name,
                value,
                size,
                max_length,
                target,
            } => BlockView {
                name: name.clone(),
                value: value.clone(),
                size: *size,
                max_length: *max_length,
                href: target.path(),
                ..BlockView::new("input", String::new())
            },
            ContentBlock::Action {
                caption, request, ..
            } => BlockView {
                href: format!(
                    "/grids/{container}/tiles/{}/actions/{}",
                    tile.id, request.action
                ),
                ..BlockView::new("action", caption.clone())
            },
        })
        .collect();
    TileView {
        id: tile.id.get(),
        class: tile.category.clone().unwrap_or_default(),
        rect,
        blocks,
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub grids: Vec<GridView>,
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render dashboard");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// `GET /` — every assembled grid.
pub async fn index<L, D, V>(State(state): State<AppState<L, D, V>>) -> DashboardTemplate
where
    L: LayoutEngine + Send + Sync + 'static,
    D: DataSource + Send + Sync + 'static,
    V: ViewerLauncher + Send + Sync + 'static,
{
    let grids = state
        .assembler
        .grids()
        .iter()
        .map(GridView::from_grid)
        .collect();
    DashboardTemplate { grids }
}
