//! web-sys implementations of the background host, its canvas surface and the
//! link opener.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::background::{
    BackgroundError, FrameCallback, Host, ResizeCallback, Surface, Viewport,
};
use crate::profile::{LinkOpener, NEW_CONTEXT};

fn host_error(err: JsValue) -> BackgroundError {
    BackgroundError::Host(format!("{err:?}"))
}

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn size(&self) -> Viewport {
        Viewport::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn set_size(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0).round() as u32);
        self.canvas.set_height(viewport.height.max(0.0).round() as u32);
    }

    fn begin_frame(&mut self, color: &str) {
        let size = self.size();
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
        self.context.set_fill_style_str(color);
    }

    fn plot(&mut self, x: f64, y: f64, size: f64) {
        let half = size / 2.0;
        self.context.fill_rect(x - half, y - half, size, size);
    }
}

/// A scheduled animation frame. Holding the closure keeps it alive until the
/// frame fires or is cancelled.
pub struct BrowserFrame {
    id: i32,
    _callback: Closure<dyn FnMut(f64)>,
}

pub struct BrowserListener {
    callback: Closure<dyn FnMut()>,
}

pub struct BrowserHost {
    window: Window,
    canvas: HtmlCanvasElement,
}

impl BrowserHost {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
            canvas,
        })
    }
}

impl Host for BrowserHost {
    type Surface = CanvasSurface;
    type Frame = BrowserFrame;
    type Listener = BrowserListener;

    fn surface(&self) -> Option<CanvasSurface> {
        let context = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface {
            canvas: self.canvas.clone(),
            context,
        })
    }

    fn viewport(&self) -> Viewport {
        window_viewport(&self.window)
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<BrowserFrame, BackgroundError> {
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(callback) = callback.take() {
                callback();
            }
        }) as Box<dyn FnMut(f64)>);
        let id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(host_error)?;
        Ok(BrowserFrame {
            id,
            _callback: closure,
        })
    }

    fn cancel_frame(&self, frame: BrowserFrame) {
        if let Err(err) = self.window.cancel_animation_frame(frame.id) {
            log::warn!("couldn't cancel animation frame {}: {err:?}", frame.id);
        }
    }

    fn listen_resize(&self, mut callback: ResizeCallback) -> Result<BrowserListener, BackgroundError> {
        let window = self.window.clone();
        let closure = Closure::wrap(Box::new(move || {
            callback(window_viewport(&window));
        }) as Box<dyn FnMut()>);
        self.window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(host_error)?;
        Ok(BrowserListener { callback: closure })
    }

    fn unlisten_resize(&self, listener: BrowserListener) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", listener.callback.as_ref().unchecked_ref())
        {
            log::warn!("couldn't remove resize listener: {err:?}");
        }
    }
}

pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window to open {url}");
            return;
        };
        match window.open_with_url_and_target(url, NEW_CONTEXT) {
            Ok(_) => log::debug!("opened {url}"),
            Err(err) => log::warn!("couldn't open {url}: {err:?}"),
        }
    }
}
