//! The contact-details form.

use declform_forms::descriptor::{FieldDescriptor, FieldType, StaticBlock};
use declform_forms::rules;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit.";

/// Field configuration, listed in authoring order; the session sorts it.
pub fn contact_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("firstName", FieldType::Text)
            .label("First name")
            .order(2)
            .rule(rules::required("First name")),
        FieldDescriptor::new("lastName", FieldType::Text)
            .label("Last name")
            .order(3)
            .rule(rules::required("Last name")),
        FieldDescriptor::new("phoneNumber", FieldType::Text)
            .label("Phone number")
            .order(4)
            .rule(rules::required("Phone number"))
            .rule(rules::too_short("Phone number")),
        FieldDescriptor::new("dateOfbirth", FieldType::Date)
            .label("Date of Birth")
            .order(5)
            .rule(rules::required("Date of Birth"))
            .rule(rules::is_valid_date("Date of Birth")),
        FieldDescriptor::new("securityWord", FieldType::Password)
            .label("Security Word")
            .order(8)
            .static_block(StaticBlock::header("Security Word"))
            .static_block(StaticBlock::paragraph(LOREM))
            .rule(rules::required("Security Word")),
        FieldDescriptor::new("vm", FieldType::Checkbox)
            .label("Virgin Media")
            .order(6)
            .static_block(StaticBlock::header("Get the full virgin experience!"))
            .static_block(StaticBlock::paragraph(LOREM))
            .rule(rules::must_be_checked("Please mark this box")),
        FieldDescriptor::new("companiesGroup", FieldType::Checkbox)
            .label("Group companies, including VM O2 and Priority")
            .order(7),
        FieldDescriptor::new("title", FieldType::Select)
            .label("Title")
            .order(0)
            .static_block(StaticBlock::header("Contact Details"))
            .options(["Mr", "Madame", "Miss", "Dr"]),
    ]
}
