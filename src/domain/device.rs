#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PosInfo {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HardwareModel {
    pub pos_info: PosInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppModel {
    pub app_id: String,
    pub app_version: String,
}

/// Describes the point-of-sale host to the platform when opening an RPC session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub device_class: String,
    pub device_uuid: String,
    pub host_os_version: String,
    pub hardware_model: HardwareModel,
    pub app_model: AppModel,
}

impl DeviceInfo {
    /// The six `pos_device_info[...]` form fields, in bracket notation.
    pub fn form_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("pos_device_info[device_class]", self.device_class.as_str()),
            ("pos_device_info[device_uuid]", self.device_uuid.as_str()),
            ("pos_device_info[host_os_version]", self.host_os_version.as_str()),
            (
                "pos_device_info[hardware_model][pos_info][description]",
                self.hardware_model.pos_info.description.as_str(),
            ),
            ("pos_device_info[app_model][app_id]", self.app_model.app_id.as_str()),
            (
                "pos_device_info[app_model][app_version]",
                self.app_model.app_version.as_str(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_cover_every_descriptor() {
        let info = DeviceInfo {
            device_class: "POS".into(),
            device_uuid: "uuid-1".into(),
            host_os_version: "linux".into(),
            hardware_model: HardwareModel {
                pos_info: PosInfo {
                    description: "counter 2".into(),
                },
            },
            app_model: AppModel {
                app_id: "com.example.pos".into(),
                app_version: "1.2.3".into(),
            },
        };

        let fields = info.form_fields();
        assert_eq!(fields[0], ("pos_device_info[device_class]", "POS"));
        assert_eq!(
            fields[3],
            (
                "pos_device_info[hardware_model][pos_info][description]",
                "counter 2"
            )
        );
        assert_eq!(fields[5], ("pos_device_info[app_model][app_version]", "1.2.3"));
    }
}
