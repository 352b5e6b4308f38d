//! Built-in back-office navigation, used when no `--menu` file is given.

use super::menu::MenuNode;

fn link(id: &str, title: &str, target: &str) -> MenuNode {
    MenuNode::link(id, title, target, None)
}

fn group(id: &str, title: &str, children: Vec<MenuNode>) -> MenuNode {
    MenuNode::dropdown(id, title, None, children)
}

/// Route of the partner list page.
pub const PARTNERS_ROUTE: &str = "/partenariat/partenaires";

pub fn default_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::dropdown(
            "dashboards",
            "Dashboards",
            Some("▦"),
            vec![
                link("general", "Général", "/dashboards/general"),
                link("finance-admin", "Finance et administration", "/dashboards/finance-admin"),
                link("rh-dashboard", "Ressources Humaines", "/dashboards/rh"),
                link("operations-dashboard", "Opérations", "/dashboards/operations"),
                link("achat-logistique", "Achat et logistique", "/dashboards/achat-logistique"),
            ],
        ),
        MenuNode::dropdown(
            "partenariat",
            "Partenariat",
            Some("⚭"),
            vec![
                group(
                    "prospections_dropdown",
                    "Prospection",
                    vec![
                        MenuNode::link("partenaires", "Partenaires", PARTNERS_ROUTE, Some("★")),
                        link("appels-a-projet", "Appels à projet", "/partenariat/appels-a-projet"),
                    ],
                ),
                group(
                    "suivi_partenaires_dropdown",
                    "Suivi des partenaires",
                    vec![
                        link("reporting", "Reporting", "/partenariat/reporting"),
                        link("recouvrements", "Recouvrements", "/partenariat/recouvrements"),
                    ],
                ),
            ],
        ),
        MenuNode::dropdown(
            "projets",
            "Projets",
            Some("◫"),
            vec![
                link("conceptions", "Conceptions", "/projets/conceptions"),
                link("evaluations", "Evaluations", "/projets/evaluations"),
                link("publications", "Publications", "/projets/publications"),
                link("sondages", "Sondages", "/projets/sondages"),
            ],
        ),
        MenuNode::dropdown(
            "rh",
            "RH",
            Some("☺"),
            vec![
                group(
                    "staff_dropdown",
                    "Staff",
                    vec![
                        link("collaborateurs", "Collaborateurs", "/rh/collaborateurs"),
                        link("absences", "Absences", "/rh/absences"),
                        link("conges", "Congés", "/rh/conges"),
                        link("ordres-de-mission", "Ordres de mission", "/rh/ordres-de-mission"),
                    ],
                ),
                group(
                    "appels_candidature_dropdown",
                    "Les appels à candidature",
                    vec![
                        link("appels-candidatures", "Appels à candidatures", "/rh/appels-candidatures"),
                        link("candidats", "Candidats", "/rh/candidats"),
                    ],
                ),
            ],
        ),
        MenuNode::dropdown(
            "achats",
            "Achats",
            Some("⛁"),
            vec![
                group(
                    "produits_dropdown",
                    "Produits",
                    vec![
                        link("marques", "Marques", "/achats/marques"),
                        link("categories", "Catégories", "/achats/categories"),
                        link("produits", "Produits", "/achats/produits"),
                    ],
                ),
                group(
                    "commandes_dropdown",
                    "Commandes",
                    vec![
                        link("demandes-achats", "Demandes d'achats", "/achats/demandes-achats"),
                        link("devis", "Devis", "/achats/devis"),
                        link("bons-de-commande", "Bons de commande", "/achats/bons-de-commande"),
                    ],
                ),
            ],
        ),
        MenuNode::dropdown(
            "finance",
            "Finance",
            Some("¤"),
            vec![
                link("factures", "Factures", "/finance/factures"),
                link("paiements", "Paiements", "/finance/paiements"),
                MenuNode::header("finance_suivi", "Suivi"),
                group(
                    "groupes_finance_dropdown",
                    "Groupes",
                    vec![
                        link("groupes_finance_link", "Groupes", "/finance/groupes"),
                        link("niveaux_finance", "Niveaux", "/finance/niveaux"),
                    ],
                ),
            ],
        ),
        MenuNode::dropdown(
            "academie",
            "Académie",
            Some("✎"),
            vec![group(
                "formations_dropdown",
                "Formations",
                vec![
                    link("formations", "Formations", "/academie/formations"),
                    link("lieux", "Lieux", "/academie/lieux"),
                ],
            )],
        ),
        MenuNode::link("lab", "LAB", "/lab", Some("⚗")),
        MenuNode::link("parametres", "Paramètres", "/parametres", Some("⚙")),
    ]
}
