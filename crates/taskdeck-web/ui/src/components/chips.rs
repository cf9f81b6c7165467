use taskdeck_shared::{
  Category,
  Tag
};
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CategoryChipsProps {
  pub categories: Vec<Category>
}

#[function_component(CategoryChips)]
pub fn category_chips(
  props: &CategoryChipsProps
) -> Html {
  if props.categories.is_empty() {
    return html! {};
  }
  html! {
      <div class="chips">
          {
              for props.categories.iter().map(|category| html! {
                  <span
                      key={category.id}
                      class="chip"
                      style={format!("border-color:{0};color:{0};", category.color)}
                  >
                      { &category.name }
                  </span>
              })
          }
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct TagChipsProps {
  pub tags: Vec<Tag>
}

#[function_component(TagChips)]
pub fn tag_chips(
  props: &TagChipsProps
) -> Html {
  if props.tags.is_empty() {
    return html! {};
  }
  html! {
      <div class="chips" style="margin-top:6px;">
          {
              for props.tags.iter().map(|tag| html! {
                  <span key={tag.id} class="chip">{ format!("#{}", tag.name) }</span>
              })
          }
      </div>
  }
}
