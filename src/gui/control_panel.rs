//! Control Panel Widget
//! Sidebar with the reactive input controls.

use crate::config::DashboardConfig;
use crate::data::{NumericAttribute, Species, SpeciesSelection};
use egui::{Color32, ComboBox, RichText};

/// Current values of every reactive input on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    /// Column of the interactive histogram
    pub selected_attribute: NumericAttribute,
    pub plotly_bin_count: u32,
    pub seaborn_bin_count: u32,
    pub selected_species: SpeciesSelection,
}

impl Inputs {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            selected_attribute: config.default_attribute,
            plotly_bin_count: config.plotly_bin_count,
            seaborn_bin_count: config.seaborn_bin_count,
            selected_species: SpeciesSelection::new(config.selected_species.iter().copied()),
        }
    }
}

/// Left side panel with the dashboard inputs.
pub struct ControlPanel {
    pub inputs: Inputs,
    heading: String,
    github_url: String,
    plotly_bin_max: u32,
    seaborn_bin_range: (u32, u32),
    status: String,
}

impl ControlPanel {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            inputs: Inputs::from_config(config),
            heading: config.sidebar_heading.clone(),
            github_url: config.github_url.clone(),
            plotly_bin_max: config.plotly_bin_max,
            seaborn_bin_range: (config.seaborn_bin_min, config.seaborn_bin_max),
            status: "Ready".to_string(),
        }
    }

    /// Draw the sidebar
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let before = self.inputs.clone();

        ui.add_space(5.0);
        ui.heading(&self.heading);
        ui.add_space(10.0);

        // Dropdown choosing the histogram column
        ui.label("Select Plotly Attribute");
        ComboBox::from_id_salt("selected_attribute")
            .width(ui.available_width())
            .selected_text(self.inputs.selected_attribute.column())
            .show_ui(ui, |ui| {
                for attribute in NumericAttribute::ALL {
                    ui.selectable_value(
                        &mut self.inputs.selected_attribute,
                        attribute,
                        attribute.column(),
                    );
                }
            });

        ui.add_space(10.0);

        ui.label("Plotly Bin Count");
        ui.add(
            egui::DragValue::new(&mut self.inputs.plotly_bin_count)
                .range(1..=self.plotly_bin_max)
                .speed(1.0),
        );

        ui.add_space(10.0);

        ui.label("Seaborn Bin Count");
        let (min, max) = self.seaborn_bin_range;
        ui.add(egui::Slider::new(&mut self.inputs.seaborn_bin_count, min..=max));

        ui.add_space(10.0);

        // Inline checkbox group
        ui.label("Species");
        ui.horizontal_wrapped(|ui| {
            for species in Species::ALL {
                let mut checked = self.inputs.selected_species.contains(species);
                if ui.checkbox(&mut checked, species.as_str()).changed() {
                    self.inputs.selected_species.set(species, checked);
                }
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.add(egui::Hyperlink::from_label_and_url("GitHub", &self.github_url).open_in_new_tab(true));

        ui.add_space(15.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if self.inputs != before {
            log::debug!("Inputs changed: {:?}", self.inputs);
        }
    }

    /// Set the status line shown under the inputs
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}
