use super::Handle;
use crate::error::{Error, ErrorKind};
use crate::queue::Step;
use std::convert::TryFrom;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = Element)]
    type AnimatableElement;

    #[wasm_bindgen(method, catch)]
    fn animate(
        this: &AnimatableElement,
        keyframes: &JsValue,
        options: &JsValue,
    ) -> Result<RunningAnimation, JsValue>;

    type RunningAnimation;

    #[wasm_bindgen(method, getter, catch)]
    fn finished(this: &RunningAnimation) -> Result<js_sys::Promise, JsValue>;
}

/// Animations and pauses. Both suspend the chain: operations chained after
/// them run once they complete.
impl Handle {
    /// Run a Web Animation with `keyframes` for `duration_ms` on every
    /// element.
    pub fn animate(&self, keyframes: js_sys::Object, duration_ms: f64) -> Result<&Self, Error> {
        self.run_animation(keyframes, JsValue::from_f64(duration_ms))
    }

    /// Run a Web Animation on every element. `options` is the timing
    /// dictionary `Element.animate` takes: `duration`, `delay`, `easing`,
    /// `iterations`, `fill` and so on.
    pub fn animate_with(
        &self,
        keyframes: js_sys::Object,
        options: js_sys::Object,
    ) -> Result<&Self, Error> {
        self.run_animation(keyframes, options.into())
    }

    fn run_animation(&self, keyframes: js_sys::Object, timing: JsValue) -> Result<&Self, Error> {
        self.dispatch("animate", move |targets| {
            let finished = js_sys::Array::new();
            for el in targets.iter() {
                let animation = el
                    .unchecked_ref::<AnimatableElement>()
                    .animate(&keyframes, &timing)?;
                let done: js_sys::Promise = animation.finished()?;
                finished.push(&done);
            }
            if finished.length() == 0 {
                return Ok(Step::Done);
            }
            Ok(Step::suspend(async move {
                JsFuture::from(js_sys::Promise::all(&finished)).await?;
                Ok::<(), ErrorKind>(())
            }))
        })
    }

    /// Pause the chain for `ms` milliseconds.
    pub fn wait(&self, ms: u32) -> Result<&Self, Error> {
        self.dispatch("wait", move |_| Ok(Step::suspend(sleep(ms))))
    }
}

/// `setTimeout` takes a signed 32-bit delay; longer waits are clamped.
fn timeout(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

async fn sleep(ms: u32) -> Result<(), ErrorKind> {
    let delay = timeout(ms);
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let scheduled = match web_sys::window() {
            Some(window) => window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay)
                .map(|_| ()),
            None => Err(JsValue::from_str("no window to schedule a timeout on")),
        };
        if let Err(e) = scheduled {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise).await?;
    Ok(())
}
