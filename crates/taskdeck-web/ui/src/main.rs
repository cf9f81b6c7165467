mod api;
mod app;
mod components;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(root) = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.get_element_by_id("app")
    })
  else {
    tracing::error!(
      "no #app element to mount into"
    );
    return;
  };

  tracing::info!(
    api = taskdeck_core::api::API_BASE_PATH,
    "mounting Taskdeck"
  );
  yew::Renderer::<app::App>::with_root(root)
    .render();
}
